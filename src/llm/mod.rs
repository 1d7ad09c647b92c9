//! Seams to the remote text- and image-generation providers.

pub mod openai;
pub mod types;

use async_trait::async_trait;

use crate::error::ServiceError;

pub use openai::OpenAiClient;
pub use types::{ChatMessage, ChatRequest, ImageRequest};

/// Chat-style text generation.
#[async_trait]
pub trait TextService: Send + Sync {
    /// Return the raw content of the first completion choice.
    async fn complete(&self, request: &ChatRequest) -> Result<String, ServiceError>;
}

/// Image generation plus retrieval of the generated asset.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Request an image and return the URL it can be fetched from.
    async fn generate(&self, request: &ImageRequest) -> Result<String, ServiceError>;

    /// Fetch the bytes behind `url`. Non-success statuses map to
    /// [`ServiceError::Status`].
    async fn download(&self, url: &str) -> Result<Vec<u8>, ServiceError>;
}
