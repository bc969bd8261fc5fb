use ::zip::ZipArchive;
use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use super::error::DictionaryArchiveError;
use super::meta::DictionaryMetadata;
use super::{file_names, DictionaryArchive};
use crate::constants::METADATA_FILE;
use crate::speller::{HunspellSpeller, Speller};

/// A dictionary packed in a zip container, such as a LibreOffice `.oxt`
/// extension. Entries are matched by file name anywhere in the container.
pub struct ZipDictionaryArchive {
    metadata: Option<DictionaryMetadata>,
    speller: Arc<HunspellSpeller>,
}

fn read_by_file_name<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, DictionaryArchiveError> {
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if Path::new(entry.name()).file_name() != Some(OsStr::new(name)) {
            continue;
        }

        let mut buf = Vec::new();
        entry
            .read_to_end(&mut buf)
            .map_err(|e| DictionaryArchiveError::Io(name.into(), e))?;
        return Ok(Some(buf));
    }

    Ok(None)
}

fn require<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>, DictionaryArchiveError> {
    read_by_file_name(archive, name)?.ok_or_else(|| DictionaryArchiveError::MissingFile(name.into()))
}

impl DictionaryArchive for ZipDictionaryArchive {
    fn open(file_path: &Path, language: &str) -> Result<ZipDictionaryArchive, DictionaryArchiveError> {
        let file = File::open(file_path).map_err(DictionaryArchiveError::File)?;
        let reader = std::io::BufReader::new(file);
        let mut archive = ZipArchive::new(reader)?;

        let (aff_name, dic_name) = file_names(language);
        let aff = require(&mut archive, &aff_name)?;
        let dic = require(&mut archive, &dic_name)?;
        let speller = HunspellSpeller::from_bytes(&aff, &dic)?;

        let metadata = match read_by_file_name(&mut archive, METADATA_FILE)? {
            Some(bytes) => match DictionaryMetadata::from_bytes(&bytes) {
                Ok(v) => Some(v),
                Err(e) => {
                    log::warn!("Ignoring unreadable {}: {}", METADATA_FILE, e);
                    None
                }
            },
            None => None,
        };

        log::debug!(
            "Opened dictionary '{}' from {}",
            language,
            file_path.display()
        );

        Ok(ZipDictionaryArchive { metadata, speller })
    }

    fn speller(&self) -> Arc<dyn Speller + Send + Sync> {
        self.speller.clone()
    }

    fn metadata(&self) -> Option<&DictionaryMetadata> {
        self.metadata.as_ref()
    }
}
