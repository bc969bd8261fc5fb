use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::constants::{DEFAULT_DICTIONARY_PATH, DEFAULT_LANGUAGE, DEFAULT_WORDS_FILE, FLAG_STYLE};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read configuration")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration")]
    Json(#[from] serde_json::Error),
}

/// Settings for a spell-checking session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellCheckConfig {
    /// Hunspell language code, e.g. `en_US`.
    pub language: SmolStr,
    /// Dictionary bundle: a directory, `.zip` or `.oxt`.
    pub dictionary_path: PathBuf,
    /// Supplemental JSON word list. `None` disables it.
    pub words_path: Option<PathBuf>,
    /// Whether checking starts switched on.
    pub enabled: bool,
    /// Style class given to misspelled words.
    pub flag_style: SmolStr,
}

impl Default for SpellCheckConfig {
    fn default() -> SpellCheckConfig {
        SpellCheckConfig {
            language: SmolStr::new(DEFAULT_LANGUAGE),
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            words_path: Some(PathBuf::from(DEFAULT_WORDS_FILE)),
            enabled: false,
            flag_style: SmolStr::new(FLAG_STYLE),
        }
    }
}

impl SpellCheckConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SpellCheckConfig, ConfigError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Resolves relative paths against `base`, typically the directory the
    /// configuration file was read from.
    pub fn relative_to(mut self, base: &Path) -> SpellCheckConfig {
        if self.dictionary_path.is_relative() {
            self.dictionary_path = base.join(&self.dictionary_path);
        }
        if let Some(words) = self.words_path.as_mut() {
            if words.is_relative() {
                *words = base.join(&*words);
            }
        }
        self
    }
}
