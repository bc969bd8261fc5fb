use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::DictionaryArchiveError;
use super::meta::DictionaryMetadata;
use super::{file_names, DictionaryArchive};
use crate::constants::METADATA_FILE;
use crate::speller::{HunspellSpeller, Speller};

/// A dictionary stored as plain files, either in a per-language
/// subdirectory (`{root}/{lang}/{lang}.aff`) or directly in the root
/// (`{root}/{lang}.aff`, the layout of system Hunspell installs).
pub struct DirectoryArchive {
    path: PathBuf,
    metadata: Option<DictionaryMetadata>,
    speller: Arc<HunspellSpeller>,
}

fn read(dir: &Path, name: &str) -> Result<Vec<u8>, DictionaryArchiveError> {
    std::fs::read(dir.join(name)).map_err(|e| DictionaryArchiveError::Io(name.into(), e))
}

impl DirectoryArchive {
    /// The directory the `.aff`/`.dic` pair was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionaryArchive for DirectoryArchive {
    fn open(root: &Path, language: &str) -> Result<DirectoryArchive, DictionaryArchiveError> {
        let metadata = std::fs::metadata(root).map_err(DictionaryArchiveError::File)?;
        if !metadata.is_dir() {
            return Err(DictionaryArchiveError::UnsupportedExt(
                root.as_os_str().to_owned(),
            ));
        }

        let (aff_name, dic_name) = file_names(language);
        let path = [root.join(language), root.to_path_buf()]
            .into_iter()
            .find(|dir| dir.join(&aff_name).is_file())
            .ok_or_else(|| DictionaryArchiveError::MissingFile(aff_name.clone()))?;

        let aff = read(&path, &aff_name)?;
        let dic = read(&path, &dic_name)?;
        let speller = HunspellSpeller::from_bytes(&aff, &dic)?;

        let metadata = match std::fs::read(path.join(METADATA_FILE)) {
            Ok(bytes) => match DictionaryMetadata::from_bytes(&bytes) {
                Ok(v) => Some(v),
                Err(e) => {
                    log::warn!("Ignoring unreadable {}: {}", METADATA_FILE, e);
                    None
                }
            },
            Err(_) => None,
        };

        log::debug!("Opened dictionary '{}' from {}", language, path.display());

        Ok(DirectoryArchive {
            path,
            metadata,
            speller,
        })
    }

    fn speller(&self) -> Arc<dyn Speller + Send + Sync> {
        self.speller.clone()
    }

    fn metadata(&self) -> Option<&DictionaryMetadata> {
        self.metadata.as_ref()
    }
}
