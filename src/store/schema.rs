use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreData {
    pub schema_version: u32,
    pub high_score: u32,
    #[serde(default)]
    pub achieved_at: Option<DateTime<Utc>>,
}

impl Default for HighScoreData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            high_score: 0,
            achieved_at: None,
        }
    }
}

impl HighScoreData {
    pub fn new(high_score: u32, achieved_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            high_score,
            achieved_at: Some(achieved_at),
        }
    }

    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
