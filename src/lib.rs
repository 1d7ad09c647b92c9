//! Batch reframing of news articles and headlines into emotional variants.

pub mod cli;
pub mod config;
pub mod data;
pub mod emotion;
pub mod error;
pub mod llm;
pub mod logging;
pub mod pipeline;

pub use config::Settings;
pub use emotion::Emotion;
pub use error::{CellError, DataError, FailureKind, ServiceError};
