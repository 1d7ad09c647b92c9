//! Emotional rewriting of article bodies and headlines.

use tracing::debug;

use crate::{
    emotion::Emotion,
    error::{CellError, FailureKind},
    llm::{ChatMessage, ChatRequest, TextService},
};

/// Which unit of text is being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReframeMode {
    Article,
    Headline,
}

impl ReframeMode {
    pub fn instruction(self, emotion: Emotion) -> String {
        match self {
            Self::Article => format!(
                "Please reframe the following text to express a {emotion} sentiment. Retain the original meaning and structure while incorporating the emotional tone."
            ),
            Self::Headline => format!(
                "Please rewrite the following headline to express a {emotion} sentiment. Keep it concise and engaging."
            ),
        }
    }

    pub fn max_tokens(self) -> u32 {
        match self {
            Self::Article => 500,
            Self::Headline => 50,
        }
    }
}

pub struct Reframer<'a> {
    service: &'a dyn TextService,
    model: String,
    mode: ReframeMode,
}

impl<'a> Reframer<'a> {
    pub fn new(service: &'a dyn TextService, model: impl Into<String>, mode: ReframeMode) -> Self {
        Self {
            service,
            model: model.into(),
            mode,
        }
    }

    pub fn request(&self, text: &str, emotion: Emotion) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.mode.instruction(emotion)),
                ChatMessage::user(text),
            ],
            max_tokens: self.mode.max_tokens(),
        }
    }

    /// Rewrite `text` to convey `emotion`. Never retries.
    pub async fn reframe(&self, text: &str, emotion: Emotion) -> Result<String, CellError> {
        let request = self.request(text, emotion);
        debug!(%emotion, mode = ?self.mode, chars = text.len(), "requesting reframe");
        let content = self
            .service
            .complete(&request)
            .await
            .map_err(|e| CellError::new(FailureKind::Reframe, e))?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(CellError::new(
                FailureKind::Reframe,
                "provider returned empty content",
            ));
        }
        Ok(trimmed.to_string())
    }
}
