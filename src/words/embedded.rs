use rust_embed::Embed;
use serde::Deserialize;

use crate::words::{WordList, WordListError};

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

#[derive(Deserialize)]
struct WordListFile {
    label: String,
    words: Vec<String>,
}

/// Load the word lists compiled into the binary, one per `<id>.toml` file,
/// ordered by id.
pub fn bundled_lists() -> Result<Vec<WordList>, WordListError> {
    let mut names: Vec<String> = WordAssets::iter()
        .filter(|name| name.ends_with(".toml"))
        .map(|name| name.into_owned())
        .collect();
    names.sort();

    names
        .iter()
        .map(|name| {
            let id = name.trim_end_matches(".toml").to_string();
            let file =
                WordAssets::get(name).ok_or_else(|| WordListError::Unreadable(id.clone()))?;
            let content = std::str::from_utf8(file.data.as_ref())
                .map_err(|_| WordListError::Unreadable(id.clone()))?;
            let parsed: WordListFile = toml::from_str(content).map_err(|source| {
                WordListError::Parse {
                    id: id.clone(),
                    source,
                }
            })?;
            Ok(WordList {
                id,
                label: parsed.label,
                words: parsed.words,
            })
        })
        .collect()
}
