/*! Spell-checking overlay for editor modes.

Finds words in a line of text, checks them against a Hunspell dictionary
plus a supplemental word list, and marks the misspelled ones with an extra
style class. The marking is done by an overlay mode that runs alongside a
document's own mode, so the document's highlighting is kept and the
overlay only adds to it.

# Usage examples

```no_run
use std::sync::Arc;
use spellmark::mode::{highlight, DocumentMode, MarkdownMode, SpellOverlay};
use spellmark::speller::{DictionaryLoader, DictionaryLookup};

let lookup = DictionaryLookup::new();
DictionaryLoader::new("en_US", "dictionaries")
    .with_words("words.json")
    .load(&lookup);

let mode = DocumentMode::new(
    Arc::new(MarkdownMode::new()),
    Arc::new(SpellOverlay::new(lookup)),
    true,
);
for span in highlight(&mode, "# The qwik brown fox") {
    println!("{:?}", span);
}
```

Further examples can be found in `spellmark-bin` in the same repository.
*/

pub mod archive;
pub mod config;
pub mod constants;
pub mod mode;
pub mod paths;
pub mod session;
pub mod speller;
pub mod tokenizer;
