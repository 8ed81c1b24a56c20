use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::HighScoreData;
use crate::store::{ScoreStore, data_dir};

const HIGH_SCORE_FILE: &str = "high_score.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(data_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_high_score_data(&self) -> HighScoreData {
        let data: HighScoreData = self.load(HIGH_SCORE_FILE);
        if data.needs_reset() {
            HighScoreData::default()
        } else {
            data
        }
    }

    pub fn save_high_score_data(&self, data: &HighScoreData) -> Result<()> {
        self.save(HIGH_SCORE_FILE, data)
    }
}

impl ScoreStore for JsonStore {
    fn load_high_score(&self) -> u32 {
        self.load_high_score_data().high_score
    }

    fn save_high_score(&self, score: u32) -> Result<()> {
        self.save_high_score_data(&HighScoreData::new(score, Utc::now()))
    }
}
