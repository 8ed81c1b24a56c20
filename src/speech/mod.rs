pub mod native;

use thiserror::Error;
use tracing::warn;

pub use native::TtsNarrator;

/// One request to say something out loud.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Relative speaking speed, 1.0 being the engine's normal pace.
    pub rate: f32,
    pub locale: String,
    /// 0.0 (silent) to 1.0 (full volume).
    pub volume: f32,
}

/// Voice settings applied to every word the quiz narrates.
#[derive(Clone, Debug, PartialEq)]
pub struct Voice {
    pub rate: f32,
    pub locale: String,
    pub volume: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            rate: 0.8,
            locale: "en-US".to_string(),
            volume: 1.0,
        }
    }
}

impl Voice {
    pub fn utterance(&self, text: &str) -> Utterance {
        Utterance {
            text: text.to_string(),
            rate: self.rate,
            locale: self.locale.clone(),
            volume: self.volume,
        }
    }
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech backend failed: {0}")]
    Backend(#[from] tts::Error),
}

/// Speech output port. Speaking is fire-and-forget: `speak` returns as soon
/// as playback has been requested.
pub trait Narrator {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stop anything pending or playing.
    fn cancel(&mut self);
}

/// Narrator used when sound is switched off.
#[derive(Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _utterance: &Utterance) -> Result<(), SpeechError> {
        Ok(())
    }

    fn cancel(&mut self) {}
}

/// The platform narrator, or a silent one when speech is switched off or
/// the platform has no usable speech service.
pub fn narrator(enabled: bool) -> Box<dyn Narrator> {
    if !enabled {
        return Box::new(SilentNarrator);
    }
    match TtsNarrator::new() {
        Ok(narrator) => Box::new(narrator),
        Err(err) => {
            warn!(error = %err, "speech unavailable, words will not be read aloud");
            Box::new(SilentNarrator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_voice_matches_classroom_settings() {
        let voice = Voice::default();
        let utterance = voice.utterance("giraffe");
        assert_eq!(utterance.text, "giraffe");
        assert_eq!(utterance.rate, 0.8);
        assert_eq!(utterance.locale, "en-US");
        assert_eq!(utterance.volume, 1.0);
    }

    #[test]
    fn silent_narrator_accepts_everything() {
        let mut narrator = SilentNarrator;
        assert!(narrator.speak(&Voice::default().utterance("cat")).is_ok());
        narrator.cancel();
    }

    #[test]
    fn disabled_speech_is_silent() {
        let mut narrator = narrator(false);
        assert!(narrator.speak(&Voice::default().utterance("tree")).is_ok());
        narrator.cancel();
    }
}
