use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::speech::Voice;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,
    #[serde(default = "default_speech_locale")]
    pub speech_locale: String,
    #[serde(default = "default_speech_volume")]
    pub speech_volume: f32,
    /// Fixes the order of the combined word list across runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u64>,
}

fn default_speech_enabled() -> bool {
    true
}
fn default_speech_rate() -> f32 {
    0.8
}
fn default_speech_locale() -> String {
    "en-US".to_string()
}
fn default_speech_volume() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speech_enabled: default_speech_enabled(),
            speech_rate: default_speech_rate(),
            speech_locale: default_speech_locale(),
            speech_volume: default_speech_volume(),
            shuffle_seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spellathon")
            .join("config.toml")
    }

    /// Clamp hand-edited values into ranges the speech engines accept.
    pub fn validate(&mut self) {
        if !self.speech_rate.is_finite() {
            self.speech_rate = default_speech_rate();
        }
        self.speech_rate = self.speech_rate.clamp(0.1, 2.0);
        if !self.speech_volume.is_finite() {
            self.speech_volume = default_speech_volume();
        }
        self.speech_volume = self.speech_volume.clamp(0.0, 1.0);
        if self.speech_locale.trim().is_empty() {
            self.speech_locale = default_speech_locale();
        }
    }

    pub fn voice(&self) -> Voice {
        Voice {
            rate: self.speech_rate,
            locale: self.speech_locale.clone(),
            volume: self.speech_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.speech_enabled);
        assert_eq!(config.speech_rate, 0.8);
        assert_eq!(config.speech_locale, "en-US");
        assert_eq!(config.speech_volume, 1.0);
        assert_eq!(config.shuffle_seed, None);
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
speech_enabled = false
shuffle_seed = 1234
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.speech_enabled);
        assert_eq!(config.shuffle_seed, Some(1234));
        assert_eq!(config.speech_rate, 0.8);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.shuffle_seed = Some(9);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.speech_rate, deserialized.speech_rate);
        assert_eq!(config.shuffle_seed, deserialized.shuffle_seed);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.speech_rate = 9.0;
        config.speech_volume = -1.0;
        config.speech_locale = String::new();
        config.validate();

        assert_eq!(config.speech_rate, 2.0);
        assert_eq!(config.speech_volume, 0.0);
        assert_eq!(config.speech_locale, "en-US");
    }

    #[test]
    fn test_config_ignores_retired_keys() {
        let toml_str = r#"
speech_program = "espeak-ng"
speech_rate = 1.1
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.speech_rate, 1.1);
    }

    #[test]
    fn test_validate_replaces_nan_rate() {
        let mut config = Config::default();
        config.speech_rate = f32::NAN;
        config.validate();
        assert_eq!(config.speech_rate, 0.8);
    }

    #[test]
    fn test_voice_uses_speech_settings() {
        let mut config = Config::default();
        config.speech_rate = 1.2;
        let voice = config.voice();
        assert_eq!(voice.rate, 1.2);
        assert_eq!(voice.locale, "en-US");
    }
}
