use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::session::grid::{self, Cell};
use crate::session::record::{AttemptRecord, Summary};
use crate::words::Category;

pub const STARTING_LIVES: u32 = 4;
pub const WORD_SECONDS: u32 = 10;
pub const HARD_WORD_SECONDS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Untimed,
    Timed,
    /// Timed with the short countdown.
    Hard,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Untimed, Mode::Timed, Mode::Hard];

    /// Hard mode is always timed.
    pub fn from_flags(timed: bool, hard: bool) -> Self {
        if hard {
            Mode::Hard
        } else if timed {
            Mode::Timed
        } else {
            Mode::Untimed
        }
    }

    pub fn is_timed(self) -> bool {
        !matches!(self, Mode::Untimed)
    }

    pub fn is_hard(self) -> bool {
        matches!(self, Mode::Hard)
    }

    pub fn word_seconds(self) -> u32 {
        if self.is_hard() {
            HARD_WORD_SECONDS
        } else {
            WORD_SECONDS
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Untimed => "Practice",
            Mode::Timed => "Timed",
            Mode::Hard => "Hard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Finished,
}

/// What a transition did, so the caller can run the side effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A new word is current and should be narrated.
    NextWord(String),
    /// Wrong answer, same word again.
    Retry,
    /// Timer moved; seconds left for the current word.
    Countdown(u32),
    Finished,
    /// The event has no meaning in this mode.
    Ignored,
}

/// One play-through. Only the transition methods below change it.
#[derive(Clone, Debug)]
pub struct Session {
    pub(crate) category: Category,
    pub(crate) mode: Mode,
    pub(crate) phase: Phase,
    pub(crate) current_word: String,
    pub(crate) input: String,
    pub(crate) lives: u32,
    pub(crate) score: u32,
    pub(crate) time_left: u32,
    pub(crate) used_words: Vec<String>,
    pub(crate) failed_attempts: u32,
    pub(crate) word_attempts: Vec<String>,
    pub(crate) history: Vec<AttemptRecord>,
    pub(crate) finished_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A fresh session with no word presented yet.
    pub fn new(category: Category, mode: Mode) -> Self {
        Self {
            category,
            mode,
            phase: Phase::Playing,
            current_word: String::new(),
            input: String::new(),
            lives: STARTING_LIVES,
            score: 0,
            time_left: mode.word_seconds(),
            used_words: Vec::new(),
            failed_attempts: 0,
            word_attempts: Vec::new(),
            history: Vec::new(),
            finished_at: None,
        }
    }

    /// New session with its first word already picked from `words`.
    pub fn start<R: Rng + ?Sized>(
        category: Category,
        mode: Mode,
        words: &[String],
        rng: &mut R,
    ) -> (Self, Step) {
        let mut session = Self::new(category, mode);
        let step = session.select_next_word(words, rng);
        (session, step)
    }

    pub fn select_next_word<R: Rng + ?Sized>(&mut self, words: &[String], rng: &mut R) -> Step {
        assert!(self.is_playing(), "cannot pick a word for a finished session");

        let available: Vec<&String> = words
            .iter()
            .filter(|w| !self.used_words.contains(w))
            .collect();

        let Some(&word) = available.choose(rng) else {
            self.finish();
            return Step::Finished;
        };

        self.current_word = word.clone();
        self.used_words.push(word.clone());
        self.input.clear();
        self.failed_attempts = 0;
        self.word_attempts.clear();
        self.time_left = self.mode.word_seconds();
        Step::NextWord(word.clone())
    }

    /// Check one answer for the current word. Comparison ignores case and is
    /// plain equality, so longer input simply fails.
    pub fn submit<R: Rng + ?Sized>(&mut self, input: &str, words: &[String], rng: &mut R) -> Step {
        assert!(self.is_playing(), "submission after the session finished");
        assert!(
            !self.current_word.is_empty(),
            "submission before any word was presented"
        );

        self.word_attempts.push(input.to_string());

        if input.to_lowercase() == self.current_word.to_lowercase() {
            self.score += 1;
            let attempts = std::mem::take(&mut self.word_attempts);
            self.history
                .push(AttemptRecord::new(&self.current_word, attempts, true));
            return self.select_next_word(words, rng);
        }

        self.lives -= 1;
        self.failed_attempts += 1;
        self.input.clear();

        if self.lives == 0 {
            let attempts = std::mem::take(&mut self.word_attempts);
            self.history
                .push(AttemptRecord::new(&self.current_word, attempts, false));
            self.finish();
            return Step::Finished;
        }
        Step::Retry
    }

    /// One second of the per-word countdown. A word that runs out of time
    /// costs a life but is not written to the history.
    pub fn tick<R: Rng + ?Sized>(&mut self, words: &[String], rng: &mut R) -> Step {
        assert!(self.is_playing(), "timer tick after the session finished");
        if !self.mode.is_timed() {
            return Step::Ignored;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return Step::Countdown(self.time_left);
        }

        self.lives -= 1;
        if self.lives == 0 {
            self.finish();
            return Step::Finished;
        }

        let step = self.select_next_word(words, rng);
        self.time_left = self.mode.word_seconds();
        step
    }

    /// Idempotent.
    pub fn finish(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Finished;
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            category: self.category.clone(),
            mode: self.mode,
            score: self.score,
            lives: self.lives,
            history: self.history.clone(),
            finished_at: self.finished_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn word_len(&self) -> usize {
        self.current_word.chars().count()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn word_attempts(&self) -> &[String] {
        &self.word_attempts
    }

    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    /// Whether the letter at `position` of the current word is shown as a hint.
    pub fn reveals_hint(&self, position: usize) -> bool {
        self.current_word
            .chars()
            .nth(position)
            .is_some_and(|letter| grid::reveals_hint(letter, self.failed_attempts))
    }

    pub fn cells(&self) -> Vec<Cell> {
        grid::cells(&self.current_word, &self.input, self.failed_attempts)
    }
}
