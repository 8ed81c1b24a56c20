use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::words::embedded;
use crate::words::{ALL_CATEGORY, Category, WordList, WordListError};

const ALL_LABEL: &str = "All Weeks";

/// Read-only word lists keyed by category, plus the shuffled `all` mix.
///
/// The `all` order is decided once here and never changes afterwards, so a
/// new process (or a new source) is the only way to reshuffle it.
pub struct WordSource {
    lists: Vec<WordList>,
    all: Vec<String>,
}

impl WordSource {
    pub fn new<R: Rng + ?Sized>(
        mut lists: Vec<WordList>,
        rng: &mut R,
    ) -> Result<Self, WordListError> {
        validate(&lists)?;
        lists.sort_by(|a, b| a.id.cmp(&b.id));

        let mut all: Vec<String> = lists.iter().flat_map(|l| l.words.clone()).collect();
        all.shuffle(rng);

        Ok(Self { lists, all })
    }

    /// `None` seeds from entropy.
    pub fn with_seed(lists: Vec<WordList>, seed: Option<u64>) -> Result<Self, WordListError> {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::new(lists, &mut rng)
    }

    pub fn embedded(seed: Option<u64>) -> Result<Self, WordListError> {
        Self::with_seed(embedded::bundled_lists()?, seed)
    }

    pub fn get(&self, category: &Category) -> Option<&[String]> {
        if category.is_all() {
            return Some(&self.all);
        }
        self.lists
            .iter()
            .find(|l| l.id == category.id())
            .map(|l| l.words.as_slice())
    }

    /// Words of a known category. Asking for an id that was never loaded is
    /// a caller bug.
    pub fn words_for(&self, category: &Category) -> &[String] {
        self.get(category)
            .unwrap_or_else(|| panic!("unknown word category `{category}`"))
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.get(category).is_some()
    }

    /// Menu order: the combined list first, then the lists by descending id.
    pub fn categories(&self) -> Vec<Category> {
        std::iter::once(Category::all())
            .chain(self.lists.iter().rev().map(|l| Category::new(l.id.clone())))
            .collect()
    }

    /// Display name; an unknown id is shown as-is.
    pub fn label<'a>(&'a self, category: &'a Category) -> &'a str {
        if category.is_all() {
            return ALL_LABEL;
        }
        self.lists
            .iter()
            .find(|l| l.id == category.id())
            .map(|l| l.label.as_str())
            .unwrap_or_else(|| category.id())
    }
}

fn validate(lists: &[WordList]) -> Result<(), WordListError> {
    let mut seen = HashSet::new();
    for list in lists {
        if list.id == ALL_CATEGORY {
            return Err(WordListError::ReservedId);
        }
        if !seen.insert(list.id.as_str()) {
            return Err(WordListError::DuplicateCategory(list.id.clone()));
        }
        if list.words.is_empty() {
            return Err(WordListError::EmptyCategory(list.id.clone()));
        }
        for word in &list.words {
            if word.is_empty() {
                return Err(WordListError::EmptyWord(list.id.clone()));
            }
            if word.chars().any(|c| c.is_uppercase() || c.is_whitespace()) {
                return Err(WordListError::NotLowercase {
                    id: list.id.clone(),
                    word: word.clone(),
                });
            }
        }
    }
    Ok(())
}
