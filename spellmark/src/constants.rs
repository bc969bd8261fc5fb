/// Style class added to misspelled words.
pub const FLAG_STYLE: &str = "spell-error";

/// Name of the composed mode layering the spell overlay over prose.
pub const SPELL_CHECK_MARKDOWN: &str = "spell-check-markdown";

/// Name of the composed mode layering the spell overlay over headings.
pub const SPELL_CHECK_HEADING: &str = "spell-check-heading";

/// Name of the overlay when registered as a mode of its own.
pub const SPELL_OVERLAY: &str = "spell-overlay";

pub const DEFAULT_LANGUAGE: &str = "en_US";
pub const DEFAULT_DICTIONARY_PATH: &str = "dictionaries";
pub const DEFAULT_WORDS_FILE: &str = "words.json";
pub const METADATA_FILE: &str = "meta.json";

pub const AFF_EXT: &str = "aff";
pub const DIC_EXT: &str = "dic";
