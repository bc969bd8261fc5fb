use std::sync::Arc;

pub mod error;
pub mod loader;
pub mod lookup;
pub mod words;

pub use self::error::{SpellerError, WordSetError};
pub use self::loader::{DictionaryLoader, LoadHandle};
pub use self::lookup::{normalize, DictionaryLookup, LoadState, LoadStatus};
pub use self::words::WordSet;

/// Answers whether a single word is correctly spelled.
pub trait Speller {
    fn is_correct(&self, word: &str) -> bool;
}

/// A speller backed by a Hunspell affix/dictionary pair.
///
/// Stem and affix expansion, casing rules and compounding all follow the
/// loaded `.aff` file.
pub struct HunspellSpeller {
    dictionary: spellbook::Dictionary,
}

impl HunspellSpeller {
    pub fn new(aff: &str, dic: &str) -> Result<Arc<HunspellSpeller>, SpellerError> {
        let dictionary = spellbook::Dictionary::new(aff, dic)
            .map_err(|e| SpellerError::Parse(e.to_string()))?;

        Ok(Arc::new(HunspellSpeller { dictionary }))
    }

    /// Builds a speller from raw file contents, replacing invalid UTF-8.
    pub fn from_bytes(aff: &[u8], dic: &[u8]) -> Result<Arc<HunspellSpeller>, SpellerError> {
        let aff = String::from_utf8_lossy(aff);
        let dic = String::from_utf8_lossy(dic);

        if matches!(aff, std::borrow::Cow::Owned(_)) || matches!(dic, std::borrow::Cow::Owned(_)) {
            log::warn!("Dictionary is not valid UTF-8; invalid sequences were replaced");
        }

        HunspellSpeller::new(&aff, &dic)
    }
}

impl std::fmt::Debug for HunspellSpeller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HunspellSpeller").finish_non_exhaustive()
    }
}

impl Speller for HunspellSpeller {
    #[inline]
    fn is_correct(&self, word: &str) -> bool {
        self.dictionary.check(word)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TEST_AFF: &str = include_str!("../../tests/data/en_TEST/en_TEST.aff");
    pub(crate) const TEST_DIC: &str = include_str!("../../tests/data/en_TEST/en_TEST.dic");

    /// Case-insensitive exact-match speller for lookup tests.
    pub(crate) struct ListSpeller(pub Vec<&'static str>);

    impl Speller for ListSpeller {
        fn is_correct(&self, word: &str) -> bool {
            let word = word.to_lowercase();
            self.0.iter().any(|w| *w == word)
        }
    }

    #[test]
    fn hunspell_stems_and_affixes() {
        let speller = HunspellSpeller::new(TEST_AFF, TEST_DIC).unwrap();
        assert!(speller.is_correct("fox"));
        assert!(speller.is_correct("foxes"));
        assert!(speller.is_correct("fox's"));
        assert!(speller.is_correct("dogs"));
        assert!(speller.is_correct("The"));
        assert!(!speller.is_correct("qwik"));
    }

    #[test]
    fn lossy_decoding() {
        let dic = b"2\nfox\ncaf\xe9\n";
        let speller = HunspellSpeller::from_bytes(TEST_AFF.as_bytes(), dic).unwrap();
        assert!(speller.is_correct("fox"));
        assert!(!speller.is_correct("qwik"));
    }
}
