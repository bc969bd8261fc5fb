//! Locating installed Hunspell dictionaries.
use std::path::{Path, PathBuf};

use language_tags::LanguageTag;

#[cfg(target_os = "macos")]
const SEARCH_DIRS: &[&str] = &["/Library/Spelling", "/usr/local/share/hunspell"];

#[cfg(windows)]
const SEARCH_DIRS: &[&str] = &[r"C:\Program Files\LibreOffice\share\extensions"];

#[cfg(not(any(target_os = "macos", windows)))]
const SEARCH_DIRS: &[&str] = &[
    "/usr/share/hunspell",
    "/usr/share/myspell",
    "/usr/share/myspell/dicts",
    "/usr/local/share/hunspell",
];

/// The Hunspell file stem for a language tag: `en-US` becomes `en_US`.
pub fn hunspell_code(tag: &LanguageTag) -> String {
    match tag.region() {
        Some(region) => format!("{}_{}", tag.primary_language(), region.to_uppercase()),
        None => tag.primary_language().to_string(),
    }
}

/// Parses either a BCP 47 tag (`en-US`) or a Hunspell code (`en_US`).
pub fn parse_language(code: &str) -> Option<LanguageTag> {
    LanguageTag::parse(&code.replace('_', "-")).ok()
}

fn find_in(dir: &Path, code: &str) -> Option<PathBuf> {
    let pattern = format!("**/{code}.aff");

    globwalk::GlobWalkerBuilder::new(dir, &pattern)
        .max_depth(3)
        .build()
        .ok()?
        .into_iter()
        .filter_map(Result::ok)
        .next()
        .and_then(|entry| entry.path().parent().map(Path::to_path_buf))
}

/// Finds the directory holding `{code}.aff` for `tag` among the usual
/// system install locations, trying `xx_YY` before the bare `xx`.
pub fn find_dictionary_path(tag: &LanguageTag) -> Option<PathBuf> {
    find_dictionary_path_in(tag, SEARCH_DIRS.iter().map(Path::new))
}

pub fn find_dictionary_path_in<'a, I>(tag: &LanguageTag, dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    let full = hunspell_code(tag);
    let primary = tag.primary_language().to_string();
    let dirs = dirs
        .into_iter()
        .filter(|d| d.is_dir())
        .collect::<Vec<_>>();

    std::iter::once(full)
        .chain(std::iter::once(primary))
        .find_map(|code| dirs.iter().find_map(|dir| find_in(dir, &code)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::data_dir;

    #[test]
    fn codes() {
        let tag = parse_language("en_US").unwrap();
        assert_eq!(hunspell_code(&tag), "en_US");
        let tag = parse_language("nb-no").unwrap();
        assert_eq!(hunspell_code(&tag), "nb_NO");
        let tag = parse_language("fr").unwrap();
        assert_eq!(hunspell_code(&tag), "fr");
        assert!(parse_language("not a tag").is_none());
    }

    #[test]
    fn finds_nested_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("dicts").join("en");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("en_GB.aff"), "").unwrap();

        let tag = parse_language("en-GB").unwrap();
        assert_eq!(
            find_dictionary_path_in(&tag, [dir.path()]),
            Some(nested.clone())
        );

        let tag = parse_language("en-AU").unwrap();
        assert_eq!(find_dictionary_path_in(&tag, [dir.path()]), None);
    }

    #[test]
    fn falls_back_to_primary_language() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("de.aff"), "").unwrap();

        let tag = parse_language("de-AT").unwrap();
        assert_eq!(
            find_dictionary_path_in(&tag, [dir.path()]),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn skips_missing_directories() {
        let tag = parse_language("en").unwrap();
        let missing = data_dir().join("does-not-exist");
        assert_eq!(find_dictionary_path_in(&tag, [missing.as_path()]), None);
    }
}
