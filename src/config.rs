//! Runtime configuration utilities for reframe-news.

use std::{env, path::PathBuf, time::Duration};

use anyhow::{anyhow, bail};

use crate::emotion::{self, Emotion};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_IMAGE_SIZE: &str = "512x512";

/// Credentials and endpoint of the text/image provider.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_base: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Application configuration resolved from `.env`, the environment and CLI
/// overrides. Passed explicitly into every component.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Delimited dataset to read.
    pub input_path: PathBuf,
    /// Destination of the augmented dataset.
    pub output_path: PathBuf,
    /// Folder receiving generated images.
    pub image_dir: PathBuf,
    pub credentials: Credentials,
    /// Emotions processed, in order.
    pub emotions: Vec<Emotion>,
    /// Chat model identifier.
    pub model: String,
    /// Square size requested from the image service, e.g. `512x512`.
    pub image_size: String,
    /// Maximum in-flight requests per emotion column.
    pub concurrency: usize,
    pub request_timeout: Duration,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let api_base = env::var("OPENAI_API_BASE")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = env::var("REFRAME_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let emotions = match env::var("REFRAME_EMOTIONS") {
            Ok(raw) => emotion::parse_list(&raw).map_err(|e| anyhow!("REFRAME_EMOTIONS: {e}"))?,
            Err(_) => Emotion::ALL.to_vec(),
        };
        let image_dir = env::var("REFRAME_IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("img_reframe"));
        let image_size =
            env::var("REFRAME_IMAGE_SIZE").unwrap_or_else(|_| DEFAULT_IMAGE_SIZE.to_string());
        let concurrency = env::var("REFRAME_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        let timeout_secs = env::var("REFRAME_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        let settings = Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
            image_dir,
            credentials: Credentials { api_key, api_base },
            emotions,
            model,
            image_size,
            concurrency,
            request_timeout: Duration::from_secs(timeout_secs),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Settings pointing at local paths with no credentials; used by tests
    /// and stub-backed runs.
    pub fn offline(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            image_dir: PathBuf::from("img_reframe"),
            credentials: Credentials {
                api_key: String::new(),
                api_base: DEFAULT_API_BASE.to_string(),
            },
            emotions: Emotion::ALL.to_vec(),
            model: DEFAULT_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            concurrency: 1,
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.concurrency == 0 {
            bail!("concurrency must be at least 1");
        }
        if self.request_timeout.is_zero() {
            bail!("request timeout must be greater than zero seconds");
        }
        if self.emotions.is_empty() {
            bail!("at least one emotion must be configured");
        }
        if !is_square_size(&self.image_size) {
            bail!(
                "image size `{}` must be square, e.g. 512x512",
                self.image_size
            );
        }
        Ok(())
    }

    /// Fail early when no API key is available for a live run.
    pub fn require_credentials(&self) -> anyhow::Result<&Credentials> {
        if self.credentials.api_key.trim().is_empty() {
            bail!("OPENAI_API_KEY is not set (export it or add it to .env)");
        }
        Ok(&self.credentials)
    }
}

fn is_square_size(size: &str) -> bool {
    match size.split_once('x') {
        Some((w, h)) => w == h && w.parse::<u32>().map(|v| v > 0).unwrap_or(false),
        None => false,
    }
}
