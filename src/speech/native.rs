use tracing::debug;
use tts::Tts;

use crate::speech::{Narrator, SpeechError, Utterance};

/// Speaks through the platform's speech service (speech-dispatcher,
/// AVFoundation, WinRT/SAPI) via the `tts` crate.
pub struct TtsNarrator {
    tts: Tts,
    /// Locale whose voice is currently selected.
    locale: Option<String>,
}

impl TtsNarrator {
    pub fn new() -> Result<Self, SpeechError> {
        let tts = Tts::default()?;
        Ok(Self { tts, locale: None })
    }

    fn apply_voice(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let features = self.tts.supported_features();
        if features.rate {
            let rate = scale_relative(
                utterance.rate,
                self.tts.min_rate(),
                self.tts.normal_rate(),
                self.tts.max_rate(),
            );
            self.tts.set_rate(rate)?;
        }
        if features.volume {
            let (min, max) = (self.tts.min_volume(), self.tts.max_volume());
            self.tts
                .set_volume(min + (max - min) * utterance.volume.clamp(0.0, 1.0))?;
        }
        if features.voice && self.locale.as_deref() != Some(utterance.locale.as_str()) {
            self.locale = Some(utterance.locale.clone());
            let voices = self.tts.voices()?;
            let languages: Vec<String> =
                voices.iter().map(|v| v.language().to_string()).collect();
            if let Some(idx) = pick_voice(&languages, &utterance.locale) {
                self.tts.set_voice(&voices[idx])?;
            } else {
                debug!(locale = %utterance.locale, "no voice for locale, keeping default");
            }
        }
        Ok(())
    }
}

impl Narrator for TtsNarrator {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if let Err(err) = self.apply_voice(utterance) {
            debug!(error = %err, "voice settings not applied");
        }
        // Interrupting replaces whatever is still being said.
        self.tts.speak(utterance.text.as_str(), true)?;
        Ok(())
    }

    fn cancel(&mut self) {
        if self.tts.supported_features().stop
            && let Err(err) = self.tts.stop()
        {
            debug!(error = %err, "could not stop speech");
        }
    }
}

/// Map a relative setting (1.0 = the engine's normal value) onto the engine's
/// own scale: below 1.0 moves towards `min`, above it towards `max`.
pub fn scale_relative(value: f32, min: f32, normal: f32, max: f32) -> f32 {
    let value = value.max(0.0);
    let scaled = if value <= 1.0 {
        min + (normal - min) * value
    } else {
        normal + (max - normal) * (value - 1.0)
    };
    scaled.clamp(min.min(max), max.max(min))
}

/// Index of the voice for `locale`: an exact tag match first, then any voice
/// of the same language.
pub fn pick_voice(languages: &[String], locale: &str) -> Option<usize> {
    let wanted = normalize_tag(locale);
    let primary = |tag: &str| tag.split('-').next().unwrap_or_default().to_string();

    languages
        .iter()
        .position(|lang| normalize_tag(lang) == wanted)
        .or_else(|| {
            let wanted_primary = primary(&wanted);
            languages
                .iter()
                .position(|lang| primary(&normalize_tag(lang)) == wanted_primary)
        })
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}
