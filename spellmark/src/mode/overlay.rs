//! Layering one mode over another.
//!
//! Both tokenizers read the same line independently, each at its own pace.
//! Every call returns the span up to whichever of the two token ends comes
//! first, so neither tokenizer's boundaries are altered, and the overlay's
//! style is merged with the base style for that span.
use std::sync::Arc;

use smol_str::SmolStr;

use super::{Mode, Style, Tokenizer};
use crate::tokenizer::StringStream;

pub struct OverlayMode {
    name: SmolStr,
    base: Arc<dyn Mode>,
    overlay: Arc<dyn Mode>,
    combine: bool,
}

impl OverlayMode {
    /// Composes `overlay` over `base`, keeping both styles where they
    /// overlap.
    pub fn new<S: Into<SmolStr>>(name: S, base: Arc<dyn Mode>, overlay: Arc<dyn Mode>) -> OverlayMode {
        OverlayMode {
            name: name.into(),
            base,
            overlay,
            combine: true,
        }
    }

    /// Composes `overlay` over `base`, letting overlay styles replace base
    /// styles where they overlap.
    pub fn replacing<S: Into<SmolStr>>(
        name: S,
        base: Arc<dyn Mode>,
        overlay: Arc<dyn Mode>,
    ) -> OverlayMode {
        OverlayMode {
            combine: false,
            ..OverlayMode::new(name, base, overlay)
        }
    }

    pub fn base(&self) -> &Arc<dyn Mode> {
        &self.base
    }

    pub fn overlay(&self) -> &Arc<dyn Mode> {
        &self.overlay
    }
}

impl Mode for OverlayMode {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokenizer(&self) -> Box<dyn Tokenizer> {
        Box::new(OverlayTokenizer::new(
            self.base.tokenizer(),
            self.overlay.tokenizer(),
            self.combine,
        ))
    }
}

pub struct OverlayTokenizer {
    base: Box<dyn Tokenizer>,
    overlay: Box<dyn Tokenizer>,
    combine: bool,
    line_seen: Option<usize>,
    base_pos: usize,
    overlay_pos: usize,
    base_cur: Option<Style>,
    overlay_cur: Option<Style>,
}

impl OverlayTokenizer {
    pub fn new(base: Box<dyn Tokenizer>, overlay: Box<dyn Tokenizer>, combine: bool) -> OverlayTokenizer {
        OverlayTokenizer {
            base,
            overlay,
            combine,
            line_seen: None,
            base_pos: 0,
            overlay_pos: 0,
            base_cur: None,
            overlay_cur: None,
        }
    }
}

impl Tokenizer for OverlayTokenizer {
    fn token(&mut self, stream: &mut StringStream<'_>) -> Option<Style> {
        let start = stream.start();

        // A token at column 0 always begins a fresh line, even when the line
        // number matches the previous stream's.
        if start == 0
            || self.line_seen != Some(stream.line())
            || self.base_pos.min(self.overlay_pos) < start
        {
            self.line_seen = Some(stream.line());
            self.base_pos = start;
            self.overlay_pos = start;
        }

        if start == self.base_pos {
            self.base_cur = self.base.token(stream);
            self.base_pos = stream.pos();
        }

        if start == self.overlay_pos {
            stream.set_pos(start);
            self.overlay_cur = self.overlay.token(stream);
            self.overlay_pos = stream.pos();
        }

        stream.set_pos(self.base_pos.min(self.overlay_pos));

        match (&self.base_cur, &self.overlay_cur) {
            (base, None) => base.clone(),
            (Some(base), Some(overlay)) if self.combine => Some(base.combine(overlay)),
            (_, Some(overlay)) => Some(overlay.clone()),
        }
    }

    fn blank_line(&mut self) {
        self.base.blank_line();
        self.overlay.blank_line();
    }
}

/// The mode a document segment is tokenized with: its base mode alone, or
/// the base mode with an overlay attached.
pub enum DocumentMode {
    Base(Arc<dyn Mode>),
    Overlaid(OverlayMode),
}

impl DocumentMode {
    /// Attaches `overlay` to `base` when `enabled`; otherwise returns `base`
    /// unchanged.
    pub fn new(base: Arc<dyn Mode>, overlay: Arc<dyn Mode>, enabled: bool) -> DocumentMode {
        if !enabled {
            return DocumentMode::Base(base);
        }

        let name = format!("{}+{}", base.name(), overlay.name());
        DocumentMode::Overlaid(OverlayMode::new(name, base, overlay))
    }

    pub fn is_overlaid(&self) -> bool {
        matches!(self, DocumentMode::Overlaid(_))
    }
}

impl Mode for DocumentMode {
    fn name(&self) -> &str {
        match self {
            DocumentMode::Base(mode) => mode.name(),
            DocumentMode::Overlaid(mode) => mode.name(),
        }
    }

    fn tokenizer(&self) -> Box<dyn Tokenizer> {
        match self {
            DocumentMode::Base(mode) => mode.tokenizer(),
            DocumentMode::Overlaid(mode) => mode.tokenizer(),
        }
    }
}
