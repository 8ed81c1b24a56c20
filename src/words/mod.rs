pub mod embedded;
pub mod source;

use std::fmt;

use thiserror::Error;

pub use source::WordSource;

/// Id of the synthetic category that mixes every other list.
pub const ALL_CATEGORY: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn all() -> Self {
        Self(ALL_CATEGORY.to_string())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL_CATEGORY
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One named group of practice words, e.g. a school week.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordList {
    pub id: String,
    pub label: String,
    pub words: Vec<String>,
}

impl WordList {
    pub fn new(id: &str, label: &str, words: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("category `{0}` has no words")]
    EmptyCategory(String),
    #[error("category `{0}` contains an empty word")]
    EmptyWord(String),
    #[error("word `{word}` in category `{id}` must be lowercase without spaces")]
    NotLowercase { id: String, word: String },
    #[error("category `{0}` is defined twice")]
    DuplicateCategory(String),
    #[error("category id `all` is reserved for the combined list")]
    ReservedId,
    #[error("bundled word list `{0}` is missing or not valid UTF-8")]
    Unreadable(String),
    #[error("failed to parse word list `{id}`: {source}")]
    Parse {
        id: String,
        #[source]
        source: toml::de::Error,
    },
}
