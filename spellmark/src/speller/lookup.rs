//! Word lookup against a morphological dictionary and a supplemental word
//! set, either of which may still be loading.
use std::sync::Arc;

use parking_lot::RwLock;
use smol_str::SmolStr;

use super::words::WordSet;
use super::Speller;

/// Load progress of one dictionary resource.
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotLoaded,
    Loaded(T),
    Failed(SmolStr),
}

impl<T> Default for LoadState<T> {
    fn default() -> LoadState<T> {
        LoadState::NotLoaded
    }
}

impl<T> LoadState<T> {
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadState::NotLoaded => LoadStatus::NotLoaded,
            LoadState::Loaded(_) => LoadStatus::Loaded,
            LoadState::Failed(_) => LoadStatus::Failed,
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loaded,
    Failed,
}

/// Removes one leading and one trailing `'`, nothing more.
pub fn normalize(word: &str) -> &str {
    let word = word.strip_prefix('\'').unwrap_or(word);
    word.strip_suffix('\'').unwrap_or(word)
}

/// Shared spelling oracle for every overlay in a session.
///
/// Lookups never block on loading and never fail: a dictionary that is not
/// loaded (or failed to load) simply recognizes nothing.
#[derive(Default)]
pub struct DictionaryLookup {
    speller: RwLock<LoadState<Arc<dyn Speller + Send + Sync>>>,
    words: RwLock<LoadState<Arc<WordSet>>>,
}

impl std::fmt::Debug for DictionaryLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (speller, words) = self.status();
        f.debug_struct("DictionaryLookup")
            .field("speller", &speller)
            .field("words", &words)
            .finish()
    }
}

impl DictionaryLookup {
    pub fn new() -> Arc<DictionaryLookup> {
        Arc::new(DictionaryLookup::default())
    }

    pub fn with_speller(speller: Arc<dyn Speller + Send + Sync>) -> Arc<DictionaryLookup> {
        let lookup = DictionaryLookup::default();
        lookup.install_speller(speller);
        Arc::new(lookup)
    }

    pub fn install_speller(&self, speller: Arc<dyn Speller + Send + Sync>) {
        *self.speller.write() = LoadState::Loaded(speller);
    }

    pub fn install_words(&self, words: WordSet) {
        *self.words.write() = LoadState::Loaded(Arc::new(words));
    }

    pub fn fail_speller<E: std::fmt::Display>(&self, reason: E) {
        *self.speller.write() = LoadState::Failed(SmolStr::new(reason.to_string()));
    }

    pub fn fail_words<E: std::fmt::Display>(&self, reason: E) {
        *self.words.write() = LoadState::Failed(SmolStr::new(reason.to_string()));
    }

    /// Load status of the morphological dictionary and the supplemental set.
    pub fn status(&self) -> (LoadStatus, LoadStatus) {
        (self.speller.read().status(), self.words.read().status())
    }

    /// Why the morphological dictionary failed to load, if it did.
    pub fn speller_failure(&self) -> Option<SmolStr> {
        match &*self.speller.read() {
            LoadState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    pub fn is_correct(&self, word: &str) -> bool {
        let word = normalize(word);

        let speller = self.speller.read().loaded().cloned();
        if let Some(speller) = speller {
            if speller.is_correct(word) {
                return true;
            }
        }

        let words = self.words.read().loaded().cloned();
        words.map(|w| w.contains(word)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speller::tests::ListSpeller;

    fn lookup() -> Arc<DictionaryLookup> {
        DictionaryLookup::with_speller(Arc::new(ListSpeller(vec![
            "the", "quick", "brown", "fox", "'word'",
        ])))
    }

    #[test]
    fn strips_one_quote_each_side() {
        assert_eq!(normalize("'word'"), "word");
        assert_eq!(normalize("''word''"), "'word'");
        assert_eq!(normalize("word'"), "word");
        assert_eq!(normalize("'word"), "word");
        assert_eq!(normalize("fox's"), "fox's");
        assert_eq!(normalize("'"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn quoted_word_checks_like_bare_word() {
        let lookup = lookup();
        assert!(lookup.is_correct("fox"));
        assert!(lookup.is_correct("'fox'"));
        assert!(lookup.is_correct("fox'"));
        assert!(!lookup.is_correct("''fox''"));
        // Only one layer is stripped, so this is checked as "'word'".
        assert!(lookup.is_correct("''word''"));
        assert!(!lookup.is_correct("word"));
    }

    #[test]
    fn supplemental_words() {
        let lookup = lookup();
        assert!(!lookup.is_correct("qwik"));
        lookup.install_words(["qwik"].into_iter().collect());
        assert!(lookup.is_correct("qwik"));
        assert!(lookup.is_correct("'qwik'"));
        assert!(!lookup.is_correct("Qwik"));
    }

    #[test]
    fn nothing_loaded_flags_everything() {
        let lookup = DictionaryLookup::new();
        assert_eq!(lookup.status(), (LoadStatus::NotLoaded, LoadStatus::NotLoaded));
        assert!(!lookup.is_correct("the"));
        assert!(!lookup.is_correct("'"));
    }

    #[test]
    fn failures_are_recorded_and_tolerated() {
        let lookup = DictionaryLookup::new();
        lookup.fail_speller("no such file");
        lookup.install_words(["qwik"].into_iter().collect());
        assert_eq!(lookup.status(), (LoadStatus::Failed, LoadStatus::Loaded));
        assert_eq!(lookup.speller_failure().as_deref(), Some("no such file"));
        assert!(!lookup.is_correct("the"));
        assert!(lookup.is_correct("qwik"));
    }

    #[test]
    fn lone_quotes_go_through_both_checks() {
        let lookup = DictionaryLookup::new();
        lookup.fail_speller("load failed");
        assert!(!lookup.is_correct("'"));
        assert!(!lookup.is_correct("''"));

        let lookup = self::lookup();
        assert!(!lookup.is_correct("'"));
        lookup.install_words(WordSet::from_iter([""]));
        assert!(lookup.is_correct("''"));
    }
}
