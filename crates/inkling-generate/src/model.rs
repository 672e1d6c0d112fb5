use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format shown next to a result.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// How a challenge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Same challenge for everyone on a given calendar date.
    Daily,
    /// Fresh entropy on every request.
    Random,
}

impl GenerationMode {
    /// Title shown above a result.
    pub fn label(self) -> &'static str {
        match self {
            GenerationMode::Daily => "每日挑战",
            GenerationMode::Random => "随机挑战",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMode::Daily => "daily",
            GenerationMode::Random => "random",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved line of a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeEntry {
    pub category: String,
    pub text: String,
}

/// Outcome of one generation request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub mode: GenerationMode,
    /// Wall-clock time of the request; unaffected by seeding.
    pub generated_at: NaiveDateTime,
    pub entries: Vec<ChallengeEntry>,
}

impl GenerationResult {
    pub fn label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
