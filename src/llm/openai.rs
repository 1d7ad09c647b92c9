//! reqwest-backed client for OpenAI-compatible chat and image endpoints.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::Settings,
    error::ServiceError,
    llm::{
        types::{ApiErrorBody, ChatRequest, ChatResponse, ImageRequest, ImageResponse},
        ImageService, TextService,
    },
};

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl OpenAiClient {
    /// Build a client from settings; fails when no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let credentials = settings.require_credentials()?;
        Ok(Self {
            http: http_client(settings)?,
            api_base: credentials.api_base.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_base)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "posting provider request");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| ServiceError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TextService for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ServiceError> {
        let payload: ChatResponse = self.post_json("chat/completions", request).await?;
        payload
            .first_content()
            .ok_or_else(|| ServiceError::Malformed("response carried no choices".into()))
    }
}

#[async_trait]
impl ImageService for OpenAiClient {
    async fn generate(&self, request: &ImageRequest) -> Result<String, ServiceError> {
        let payload: ImageResponse = self.post_json("images/generations", request).await?;
        payload
            .first_url()
            .ok_or_else(|| ServiceError::Malformed("response carried no image url".into()))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        debug!(%url, "downloading generated image");
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ServiceError::Status(resp.status().as_u16()));
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

async fn check_status(resp: Response) -> Result<Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ServiceError::Api {
        status: status.as_u16(),
        message: api_error_message(&body),
    })
}

/// Prefer the provider's `error.message`; fall back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn http_client(settings: &Settings) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!("reframe-news/", env!("CARGO_PKG_VERSION")))
        .timeout(settings.request_timeout)
        .gzip(true)
        .brotli(true)
        .build()?)
}
