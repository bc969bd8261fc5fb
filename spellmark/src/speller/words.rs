//! Supplemental exact-match word list.
use std::io::Read;
use std::path::Path;

use hashbrown::HashSet;
use smol_str::SmolStr;

use super::error::WordSetError;

/// A set of extra words accepted verbatim.
///
/// Loaded from a JSON object whose keys are the words; the values are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<SmolStr>,
}

impl WordSet {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<WordSet, WordSetError> {
        let file = std::fs::File::open(path)?;
        WordSet::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<WordSet, WordSetError> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        WordSet::from_json(value)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<WordSet, WordSetError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        WordSet::from_json(value)
    }

    fn from_json(value: serde_json::Value) -> Result<WordSet, WordSetError> {
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().map(|(k, _)| k).collect()),
            _ => Err(WordSetError::NotAMapping),
        }
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<SmolStr>> FromIterator<S> for WordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> WordSet {
        WordSet {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
