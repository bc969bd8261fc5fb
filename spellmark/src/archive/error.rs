//! Archive-related errors.
use std::{ffi::OsString, io::Error};

use crate::speller::SpellerError;

/// Errors that can occur when opening a dictionary bundle.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DictionaryArchiveError {
    /// Error opening the bundle itself
    #[error("Failed to open dictionary bundle")]
    File(#[source] Error),

    /// I/O error while reading a file inside the bundle
    #[error("I/O error reading '{0}'")]
    Io(String, #[source] Error),

    /// The bundle does not contain a required file
    #[error("Dictionary bundle has no '{0}'")]
    MissingFile(String),

    /// Path is neither a directory nor a supported archive (.zip or .oxt)
    #[error("Unsupported dictionary bundle: {0:?}")]
    UnsupportedExt(OsString),

    /// Error reading the zip container
    #[error("Failed to read zip archive: {0}")]
    Zip(#[from] ::zip::result::ZipError),

    /// Error parsing the bundle's metadata
    #[error("Failed to parse metadata")]
    MetadataParse(#[source] serde_json::Error),

    /// The affix/dictionary pair could not be compiled
    #[error("Failed to compile dictionary")]
    Speller(#[from] SpellerError),
}
