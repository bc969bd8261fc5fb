use std::sync::Arc;

use super::{Mode, Style, Tokenizer};
use crate::constants::{FLAG_STYLE, SPELL_OVERLAY};
use crate::speller::DictionaryLookup;
use crate::tokenizer::{BoundarySet, StringStream, WordRun};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellTag {
    Ordinary,
    Flagged,
}

/// Overlay that marks misspelled words.
///
/// It finds words on its own with a [`BoundarySet`] and asks the shared
/// [`DictionaryLookup`] about each one. Non-word runs are never flagged.
#[derive(Debug, Clone)]
pub struct SpellOverlay {
    lookup: Arc<DictionaryLookup>,
    boundaries: Arc<BoundarySet>,
    style: Style,
}

impl SpellOverlay {
    pub fn new(lookup: Arc<DictionaryLookup>) -> SpellOverlay {
        SpellOverlay {
            lookup,
            boundaries: Arc::new(BoundarySet::default()),
            style: Style::new(FLAG_STYLE),
        }
    }

    pub fn with_style(mut self, style: Style) -> SpellOverlay {
        self.style = style;
        self
    }

    pub fn lookup(&self) -> &Arc<DictionaryLookup> {
        &self.lookup
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Reads the next run from `stream` and tags it.
    pub fn classify<'a>(&self, stream: &mut StringStream<'a>) -> Option<(WordRun<'a>, SpellTag)> {
        let run = self.boundaries.next_token(stream)?;

        let tag = if run.is_word && !self.lookup.is_correct(run.text) {
            SpellTag::Flagged
        } else {
            SpellTag::Ordinary
        };

        Some((run, tag))
    }
}

impl Tokenizer for SpellOverlay {
    fn token(&mut self, stream: &mut StringStream<'_>) -> Option<Style> {
        match self.classify(stream) {
            Some((_, SpellTag::Flagged)) => Some(self.style.clone()),
            _ => None,
        }
    }
}

impl Mode for SpellOverlay {
    fn name(&self) -> &str {
        SPELL_OVERLAY
    }

    fn tokenizer(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}
