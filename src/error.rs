//! Error types shared across the loader, the service clients and the pipelines.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fatal failures while reading or writing the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column `{0}` not present in table")]
    MissingColumn(String),
    #[error("column `{column}` has {actual} values but the table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Failures raised by the remote text/image services or the image download.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Image(#[from] image::ImageError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Which stage of a cell computation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Reframe,
    GenerateImage,
    DownloadImage,
    SaveImage,
}

impl FailureKind {
    /// Prefix written into the output cell for this kind of failure.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Reframe => "Failed to reframe",
            Self::GenerateImage | Self::SaveImage => "Failed to generate image",
            Self::DownloadImage => "Failed to download image",
        }
    }
}

/// A recoverable per-cell failure. Rendered with [`fmt::Display`] into the
/// failure marker stored in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellError {
    pub kind: FailureKind,
    pub message: String,
}

impl CellError {
    pub fn new(kind: FailureKind, source: impl fmt::Display) -> Self {
        Self {
            kind,
            message: source.to_string(),
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.marker(), self.message)
    }
}

impl std::error::Error for CellError {}
