pub mod json_store;
pub mod schema;

use std::path::PathBuf;

use anyhow::Result;

pub use json_store::JsonStore;

/// Persistence port for the one number that outlives a session.
pub trait ScoreStore {
    /// Zero when nothing has been saved yet or the saved data is unusable.
    fn load_high_score(&self) -> u32;

    fn save_high_score(&self, score: u32) -> Result<()>;
}

/// `<platform data dir>/spellathon`, or `./spellathon` when the platform has none.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spellathon")
}

/// Stands in when the data directory cannot be created; every game starts from zero.
pub struct NullStore;

impl ScoreStore for NullStore {
    fn load_high_score(&self) -> u32 {
        0
    }

    fn save_high_score(&self, _score: u32) -> Result<()> {
        Ok(())
    }
}
