use serde::{Deserialize, Serialize};

use super::error::DictionaryArchiveError;

/// Descriptive information shipped alongside a dictionary as `meta.json`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryMetadata {
    pub locale: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub producer: String,
}

impl std::str::FromStr for DictionaryMetadata {
    type Err = DictionaryArchiveError;

    fn from_str(string: &str) -> Result<DictionaryMetadata, DictionaryArchiveError> {
        DictionaryMetadata::from_bytes(string.as_bytes())
    }
}

impl DictionaryMetadata {
    pub fn from_bytes(bytes: &[u8]) -> Result<DictionaryMetadata, DictionaryArchiveError> {
        serde_json::from_slice(bytes).map_err(DictionaryArchiveError::MetadataParse)
    }
}

#[test]
fn test_json_parse() {
    use std::str::FromStr;

    let json_data = r##"
        {
            "locale": "en_US",
            "title": "English (United States)",
            "description": "Hunspell dictionary for American English.",
            "producer": "SCOWL"
        }
    "##;

    let s = DictionaryMetadata::from_str(json_data).unwrap();
    assert_eq!(s.locale, "en_US");
    assert_eq!(s.producer, "SCOWL");

    let s = DictionaryMetadata::from_str(r#"{"locale": "nb_NO"}"#).unwrap();
    assert_eq!(s.title, "");

    assert!(DictionaryMetadata::from_str(r#"{"title": "no locale"}"#).is_err());
}
