//! Dictionary bundles: a Hunspell `.aff`/`.dic` pair plus optional metadata,
//! stored either in a directory or in a zip container.
use std::path::Path;
use std::sync::Arc;

pub mod dir;
pub mod error;
pub mod meta;
pub mod zip;

pub use self::dir::DirectoryArchive;
pub use self::error::DictionaryArchiveError;
pub use self::meta::DictionaryMetadata;
pub use self::zip::ZipDictionaryArchive;
use crate::constants::{AFF_EXT, DIC_EXT};
use crate::speller::Speller;

pub trait DictionaryArchive {
    fn open(path: &Path, language: &str) -> Result<Self, DictionaryArchiveError>
    where
        Self: Sized;

    fn speller(&self) -> Arc<dyn Speller + Send + Sync>;
    fn metadata(&self) -> Option<&DictionaryMetadata>;
}

/// File names of the affix and word files for a language code.
pub(crate) fn file_names(language: &str) -> (String, String) {
    (
        format!("{language}.{AFF_EXT}"),
        format!("{language}.{DIC_EXT}"),
    )
}

/// Opens the bundle at `path` for `language`, choosing the format from the
/// path: directories are read as-is, `.zip` and `.oxt` files as zip
/// containers.
pub fn open<P>(
    path: P,
    language: &str,
) -> Result<Box<dyn DictionaryArchive + Send + Sync>, DictionaryArchiveError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if path.is_dir() {
        return Ok(Box::new(DirectoryArchive::open(path, language)?));
    }

    match path.extension() {
        Some(ext) if ext == "zip" || ext == "oxt" => {
            Ok(Box::new(ZipDictionaryArchive::open(path, language)?))
        }
        Some(ext) => Err(DictionaryArchiveError::UnsupportedExt(ext.to_owned())),
        None => Err(DictionaryArchiveError::UnsupportedExt(
            path.as_os_str().to_owned(),
        )),
    }
}
