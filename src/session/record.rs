use chrono::{DateTime, Utc};

use crate::session::state::Mode;
use crate::words::Category;

/// Outcome of one finished word: solved, or the word on which the last life
/// was lost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRecord {
    pub word: String,
    /// Raw submissions in the order they were made.
    pub attempts: Vec<String>,
    pub success: bool,
    pub attempts_count: usize,
}

impl AttemptRecord {
    pub fn new(word: &str, attempts: Vec<String>, success: bool) -> Self {
        Self {
            word: word.to_string(),
            attempts_count: attempts.len(),
            attempts,
            success,
        }
    }

    pub fn first_try(&self) -> bool {
        self.success && self.attempts_count == 1
    }

    pub fn tries_label(&self) -> String {
        if self.attempts_count == 1 {
            "1 try".to_string()
        } else {
            format!("{} tries", self.attempts_count)
        }
    }
}

/// Positions in `attempt` whose letter differs from the target at the same
/// position. Letters past the end of the target always differ.
pub fn mismatched_positions(attempt: &str, word: &str) -> Vec<usize> {
    let target: Vec<char> = word.chars().collect();
    attempt
        .chars()
        .enumerate()
        .filter(|&(i, ch)| target.get(i) != Some(&ch))
        .map(|(i, _)| i)
        .collect()
}

/// What the end-of-game screen shows.
#[derive(Clone, Debug)]
pub struct Summary {
    pub category: Category,
    pub mode: Mode,
    pub score: u32,
    pub lives: u32,
    pub history: Vec<AttemptRecord>,
    pub finished_at: DateTime<Utc>,
}

impl Summary {
    pub fn first_try_count(&self) -> usize {
        self.history.iter().filter(|r| r.first_try()).count()
    }
}
