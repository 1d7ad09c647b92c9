//! Target sentiments used as prompt parameters and column suffixes.

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Hopeful,
    Fearful,
}

impl Emotion {
    /// Processing order used when no explicit list is configured.
    pub const ALL: [Emotion; 3] = [Emotion::Angry, Emotion::Hopeful, Emotion::Fearful];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Hopeful => "hopeful",
            Self::Fearful => "fearful",
        }
    }

    /// Column holding the reframed article body.
    pub fn text_column(self) -> String {
        format!("text_{}", self.as_str())
    }

    /// Column holding the reframed headline.
    pub fn title_column(self) -> String {
        format!("{}_title", self.as_str())
    }

    /// Column holding the saved image path.
    pub fn image_column(self) -> String {
        format!("{}_img", self.as_str())
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "angry" => Ok(Self::Angry),
            "hopeful" => Ok(Self::Hopeful),
            "fearful" => Ok(Self::Fearful),
            other => Err(format!(
                "unknown emotion `{other}` (expected angry, hopeful or fearful)"
            )),
        }
    }
}

/// Parse a comma separated emotion list, keeping the given order and
/// dropping duplicates.
pub fn parse_list(raw: &str) -> Result<Vec<Emotion>, String> {
    let mut out = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let emotion: Emotion = part.parse()?;
        if !out.contains(&emotion) {
            out.push(emotion);
        }
    }
    if out.is_empty() {
        return Err("emotion list is empty".to_string());
    }
    Ok(out)
}
