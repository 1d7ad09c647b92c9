//! Headline illustration: prompt, generation, download and local storage.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::debug;

use crate::{
    emotion::Emotion,
    error::{CellError, FailureKind, ServiceError},
    llm::{ImageRequest, ImageService},
};

/// Build the image prompt, dropping quote characters from the headline.
pub fn image_prompt(title: &str, emotion: Emotion) -> String {
    let sanitized: String = title.chars().filter(|c| *c != '\'' && *c != '"').collect();
    format!(
        "A visually compelling representation of an {emotion} sentiment based on the headline: {sanitized}."
    )
}

/// `{id}_{emotion}.png`, with path separators in `id` replaced.
pub fn image_file_name(record_id: &str, emotion: Emotion) -> String {
    let id: String = record_id
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{id}_{emotion}.png")
}

/// Only a non-success status is a download failure; transport errors while
/// fetching count as generation failures.
fn download_failure(err: ServiceError) -> CellError {
    match err {
        ServiceError::Status(_) => CellError::new(FailureKind::DownloadImage, err),
        other => CellError::new(FailureKind::GenerateImage, other),
    }
}

pub struct Synthesizer<'a> {
    service: &'a dyn ImageService,
    image_dir: PathBuf,
    size: String,
}

impl<'a> Synthesizer<'a> {
    pub fn new(
        service: &'a dyn ImageService,
        image_dir: impl Into<PathBuf>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            service,
            image_dir: image_dir.into(),
            size: size.into(),
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Generate, download and persist one image; returns the saved path.
    pub async fn synthesize(
        &self,
        title: &str,
        emotion: Emotion,
        record_id: &str,
    ) -> Result<PathBuf, CellError> {
        let request = ImageRequest {
            prompt: image_prompt(title, emotion),
            n: 1,
            size: self.size.clone(),
        };
        debug!(%emotion, record_id, "requesting image");
        let url = self
            .service
            .generate(&request)
            .await
            .map_err(|e| CellError::new(FailureKind::GenerateImage, e))?;
        let bytes = self
            .service
            .download(&url)
            .await
            .map_err(download_failure)?;
        let path = self.image_dir.join(image_file_name(record_id, emotion));
        self.persist(&bytes, &path)
            .map_err(|e| CellError::new(FailureKind::SaveImage, e))?;
        Ok(path)
    }

    fn persist(&self, bytes: &[u8], path: &Path) -> Result<(), ServiceError> {
        std::fs::create_dir_all(&self.image_dir)?;
        let decoded = image::load_from_memory(bytes)?;
        decoded.save_with_format(path, ImageFormat::Png)?;
        debug!(path = %path.display(), "saved image");
        Ok(())
    }
}
