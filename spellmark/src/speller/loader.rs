//! Loading dictionary resources into a [`DictionaryLookup`], in the
//! background if needed.
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use smol_str::SmolStr;

use super::lookup::DictionaryLookup;
use super::words::WordSet;
use crate::archive;
use crate::config::SpellCheckConfig;

#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    language: SmolStr,
    dictionary_path: PathBuf,
    words_path: Option<PathBuf>,
}

/// Threads started by [`DictionaryLoader::spawn`].
pub struct LoadHandle {
    speller: JoinHandle<()>,
    words: Option<JoinHandle<()>>,
}

impl LoadHandle {
    /// Blocks until both resources have either loaded or failed.
    pub fn join(self) {
        if self.speller.join().is_err() {
            log::error!("Dictionary loader thread panicked");
        }
        if let Some(words) = self.words {
            if words.join().is_err() {
                log::error!("Word list loader thread panicked");
            }
        }
    }
}

impl DictionaryLoader {
    pub fn new<S: Into<SmolStr>, P: Into<PathBuf>>(language: S, dictionary_path: P) -> DictionaryLoader {
        DictionaryLoader {
            language: language.into(),
            dictionary_path: dictionary_path.into(),
            words_path: None,
        }
    }

    pub fn with_words<P: Into<PathBuf>>(mut self, words_path: P) -> DictionaryLoader {
        self.words_path = Some(words_path.into());
        self
    }

    pub fn from_config(config: &SpellCheckConfig) -> DictionaryLoader {
        DictionaryLoader {
            language: config.language.clone(),
            dictionary_path: config.dictionary_path.clone(),
            words_path: config.words_path.clone(),
        }
    }

    /// Loads the morphological dictionary, recording success or failure in
    /// `lookup`.
    pub fn load_speller(&self, lookup: &DictionaryLookup) {
        log::debug!(
            "Loading dictionary '{}' from {}",
            self.language,
            self.dictionary_path.display()
        );

        match archive::open(&self.dictionary_path, &self.language) {
            Ok(archive) => {
                lookup.install_speller(archive.speller());
                log::info!("Loaded dictionary '{}'", self.language);
            }
            Err(e) => {
                log::warn!(
                    "Failed to load dictionary '{}' from {}: {}; every word will be flagged",
                    self.language,
                    self.dictionary_path.display(),
                    e
                );
                lookup.fail_speller(e);
            }
        }
    }

    /// Loads the supplemental word list, if one is configured.
    pub fn load_words(&self, lookup: &DictionaryLookup) {
        let path = match self.words_path.as_ref() {
            Some(v) => v,
            None => return,
        };

        match WordSet::open(path) {
            Ok(words) => {
                if words.is_empty() {
                    log::warn!("Word list {} has no entries", path.display());
                }
                log::info!("Loaded {} supplemental words from {}", words.len(), path.display());
                lookup.install_words(words);
            }
            Err(e) => {
                log::warn!("Failed to load word list {}: {}", path.display(), e);
                lookup.fail_words(e);
            }
        }
    }

    pub fn load(&self, lookup: &DictionaryLookup) {
        self.load_speller(lookup);
        self.load_words(lookup);
    }

    /// Loads both resources on their own threads. Lookups made before
    /// loading finishes see whatever has completed so far.
    pub fn spawn(self, lookup: Arc<DictionaryLookup>) -> std::io::Result<LoadHandle> {
        let this = Arc::new(self);

        let words = if this.words_path.is_some() {
            let (this, lookup) = (this.clone(), lookup.clone());
            Some(
                std::thread::Builder::new()
                    .name("spellmark-words".into())
                    .spawn(move || this.load_words(&lookup))?,
            )
        } else {
            None
        };

        let speller = std::thread::Builder::new()
            .name("spellmark-dictionary".into())
            .spawn(move || this.load_speller(&lookup))?;

        Ok(LoadHandle { speller, words })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::data_dir;
    use crate::speller::LoadStatus;

    #[test]
    fn loads_both() {
        let lookup = DictionaryLookup::new();
        DictionaryLoader::new("en_TEST", data_dir())
            .with_words(data_dir().join("words.json"))
            .load(&lookup);

        assert_eq!(lookup.status(), (LoadStatus::Loaded, LoadStatus::Loaded));
        assert!(lookup.is_correct("foxes"));
        assert!(lookup.is_correct("qwik"));
        assert!(!lookup.is_correct("qwick"));
    }

    #[test]
    fn spawned_loading() {
        let lookup = DictionaryLookup::new();
        assert!(!lookup.is_correct("qwik"));

        let handle = DictionaryLoader::new("en_TEST", data_dir())
            .with_words(data_dir().join("words.json"))
            .spawn(lookup.clone())
            .unwrap();
        handle.join();

        assert!(lookup.is_correct("brown"));
        assert!(lookup.is_correct("qwik"));
    }

    #[test]
    fn missing_resources_degrade() {
        let lookup = DictionaryLookup::new();
        DictionaryLoader::new("xx_XX", data_dir())
            .with_words(data_dir().join("nope.json"))
            .load(&lookup);

        assert_eq!(lookup.status(), (LoadStatus::Failed, LoadStatus::Failed));
        assert!(lookup.speller_failure().is_some());
        assert!(!lookup.is_correct("brown"));
    }

    #[test]
    fn from_config_without_words() {
        let config = SpellCheckConfig {
            language: "en_TEST".into(),
            dictionary_path: data_dir(),
            words_path: None,
            ..SpellCheckConfig::default()
        };
        let lookup = DictionaryLookup::new();
        DictionaryLoader::from_config(&config)
            .spawn(lookup.clone())
            .unwrap()
            .join();

        assert_eq!(lookup.status(), (LoadStatus::Loaded, LoadStatus::NotLoaded));
        assert!(!lookup.is_correct("qwik"));
    }
}
