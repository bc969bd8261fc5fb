//! Turning spell checking on and off across the segments of a document.
//!
//! Prose segments (markdown and headings) switch to a composed mode while
//! checking is on and get their original mode back when it is turned off.
//! Code segments keep their mode and have the bare overlay attached instead.
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::SpellCheckConfig;
use crate::constants::{SPELL_CHECK_HEADING, SPELL_CHECK_MARKDOWN};
use crate::mode::{
    flagged_spans, highlight, DocumentMode, HeadingMode, MarkdownMode, Mode, ModeError,
    ModeRegistry, ModeSpec, PlainMode, SpellOverlay, Style, StyledSpan,
};

pub use crate::mode::FlaggedWord;
use crate::speller::DictionaryLookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Markdown,
    Heading,
    Code,
    Raw,
}

/// One independently highlighted piece of a document, such as a notebook
/// cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub source: String,
    mode: ModeSpec,
    saved_mode: Option<ModeSpec>,
    spell_overlay: bool,
}

impl Segment {
    pub fn new<S: Into<String>>(kind: SegmentKind, mode: ModeSpec, source: S) -> Segment {
        Segment {
            kind,
            source: source.into(),
            mode,
            saved_mode: None,
            spell_overlay: false,
        }
    }

    /// The mode the segment is currently highlighted with.
    pub fn mode(&self) -> &ModeSpec {
        &self.mode
    }

    /// Whether the bare spell overlay is attached (code segments only).
    pub fn has_spell_overlay(&self) -> bool {
        self.spell_overlay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Off,
    On,
}

impl Default for CheckState {
    fn default() -> Self {
        CheckState::Off
    }
}

/// The modes the host uses for each kind of segment.
#[derive(Debug, Clone)]
pub struct HostModes {
    pub markdown: ModeSpec,
    pub heading: Option<ModeSpec>,
    pub code: ModeSpec,
}

impl Default for HostModes {
    fn default() -> Self {
        HostModes {
            markdown: ModeSpec::new(MarkdownMode::NAME),
            heading: Some(ModeSpec::new(HeadingMode::NAME)),
            code: ModeSpec::new(PlainMode::NAME),
        }
    }
}

impl HostModes {
    fn initial(&self, kind: SegmentKind) -> ModeSpec {
        match kind {
            SegmentKind::Markdown => self.markdown.clone(),
            SegmentKind::Heading => self.heading.clone().unwrap_or_else(|| self.markdown.clone()),
            SegmentKind::Code => self.code.clone(),
            SegmentKind::Raw => ModeSpec::new(PlainMode::NAME),
        }
    }
}

pub struct SpellCheckSession {
    registry: ModeRegistry,
    overlay: Arc<SpellOverlay>,
    host: HostModes,
    composed_markdown: Option<ModeSpec>,
    composed_heading: Option<ModeSpec>,
    state: CheckState,
}

fn define_or_skip(
    registry: &mut ModeRegistry,
    name: &str,
    base: Option<&ModeSpec>,
    overlay: Arc<dyn Mode>,
) -> Option<ModeSpec> {
    let base = match base {
        Some(base) => base,
        None => {
            log::debug!("No base mode for '{}', not registering it", name);
            return None;
        }
    };

    match registry.define_overlay(name, base, overlay) {
        Ok(spec) => Some(spec),
        Err(ModeError::ComposedModeUnavailable { name, base }) => {
            log::debug!("Base mode '{}' not registered, skipping '{}'", base, name);
            None
        }
    }
}

impl SpellCheckSession {
    /// Registers the composed prose and heading modes in `registry`. A
    /// composed mode whose base is missing is left out, and segments of that
    /// kind are then not checked.
    pub fn new(mut registry: ModeRegistry, overlay: SpellOverlay, host: HostModes) -> SpellCheckSession {
        let overlay = Arc::new(overlay);

        let composed_markdown = define_or_skip(
            &mut registry,
            SPELL_CHECK_MARKDOWN,
            Some(&host.markdown),
            overlay.clone(),
        );
        let composed_heading = define_or_skip(
            &mut registry,
            SPELL_CHECK_HEADING,
            host.heading.as_ref(),
            overlay.clone(),
        );

        SpellCheckSession {
            registry,
            overlay,
            host,
            composed_markdown,
            composed_heading,
            state: CheckState::Off,
        }
    }

    /// A session flagging with `config.flag_style`, already switched on when
    /// `config.enabled` is set.
    pub fn from_config(
        registry: ModeRegistry,
        lookup: Arc<DictionaryLookup>,
        host: HostModes,
        config: &SpellCheckConfig,
    ) -> SpellCheckSession {
        let overlay = SpellOverlay::new(lookup).with_style(Style::new(config.flag_style.clone()));
        let mut session = SpellCheckSession::new(registry, overlay, host);
        if config.enabled {
            session.toggle(&mut []);
        }
        session
    }

    pub fn state(&self) -> CheckState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == CheckState::On
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn overlay(&self) -> &Arc<SpellOverlay> {
        &self.overlay
    }

    /// Flips between on and off and applies the new state to `segments`.
    pub fn toggle(&mut self, segments: &mut [Segment]) -> CheckState {
        self.state = match self.state {
            CheckState::Off => CheckState::On,
            CheckState::On => CheckState::Off,
        };
        log::info!(
            "Spell checking {} for {} segments",
            if self.is_on() { "enabled" } else { "disabled" },
            segments.len()
        );

        for segment in segments.iter_mut() {
            self.apply(segment);
        }
        self.state
    }

    /// Creates a segment in its host mode, with checking applied if it is
    /// currently on.
    pub fn new_segment<S: Into<String>>(&self, kind: SegmentKind, source: S) -> Segment {
        let mut segment = Segment::new(kind, self.host.initial(kind), source);
        self.apply(&mut segment);
        segment
    }

    fn composed_for(&self, kind: SegmentKind) -> Option<&ModeSpec> {
        match kind {
            SegmentKind::Markdown => self.composed_markdown.as_ref(),
            SegmentKind::Heading => self.composed_heading.as_ref(),
            SegmentKind::Code | SegmentKind::Raw => None,
        }
    }

    /// Brings `segment` in line with the current state. Applying twice is the
    /// same as applying once.
    pub fn apply(&self, segment: &mut Segment) {
        match segment.kind {
            SegmentKind::Markdown | SegmentKind::Heading => {
                if self.is_on() {
                    if let Some(composed) = self.composed_for(segment.kind) {
                        if segment.saved_mode.is_none() {
                            segment.saved_mode = Some(segment.mode.clone());
                        }
                        segment.mode = composed.clone();
                    }
                } else if let Some(original) = segment.saved_mode.take() {
                    segment.mode = original;
                }
            }
            SegmentKind::Code => segment.spell_overlay = self.is_on(),
            SegmentKind::Raw => {}
        }
    }

    /// The mode `segment` is highlighted with right now.
    pub fn mode_for(&self, segment: &Segment) -> DocumentMode {
        let base = self.registry.resolve(&segment.mode);
        DocumentMode::new(base, self.overlay.clone(), segment.spell_overlay)
    }

    pub fn highlight(&self, segment: &Segment) -> Vec<StyledSpan> {
        highlight(&self.mode_for(segment), &segment.source)
    }

    /// Spans of `segment` carrying the flagged style.
    pub fn flagged_words(&self, segment: &Segment) -> Vec<FlaggedWord> {
        flagged_spans(self.overlay.style(), &segment.source, &self.highlight(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLAG_STYLE;
    use crate::speller::tests::ListSpeller;

    fn session(host: HostModes) -> SpellCheckSession {
        let lookup = DictionaryLookup::with_speller(Arc::new(ListSpeller(vec![
            "the", "quick", "brown", "fox", "title", "let", "x",
        ])));
        SpellCheckSession::new(ModeRegistry::with_builtin(), SpellOverlay::new(lookup), host)
    }

    fn words(flagged: &[FlaggedWord]) -> Vec<&str> {
        flagged.iter().map(|w| w.word.as_str()).collect()
    }

    #[test]
    fn toggle_round_trip_restores_modes() {
        let mut session = session(HostModes::default());
        let mut segments = vec![
            session.new_segment(SegmentKind::Markdown, "# Title\nThe qwik fox"),
            session.new_segment(SegmentKind::Heading, "Teh title"),
            session.new_segment(SegmentKind::Code, "let x = qwik;"),
            session.new_segment(SegmentKind::Raw, "qwik"),
        ];
        let before = segments.clone();
        let spans_before = segments.iter().map(|s| session.highlight(s)).collect::<Vec<_>>();

        assert_eq!(session.toggle(&mut segments), CheckState::On);
        assert_eq!(segments[0].mode(), &ModeSpec::new(SPELL_CHECK_MARKDOWN));
        assert_eq!(segments[1].mode(), &ModeSpec::new(SPELL_CHECK_HEADING));
        assert_eq!(segments[2].mode(), before[2].mode());
        assert!(segments[2].has_spell_overlay());
        assert_eq!(segments[3], before[3]);

        assert_eq!(session.toggle(&mut segments), CheckState::Off);
        assert_eq!(segments, before);
        let spans_after = segments.iter().map(|s| session.highlight(s)).collect::<Vec<_>>();
        assert_eq!(spans_after, spans_before);
    }

    #[test]
    fn flags_prose_and_code_while_on() {
        let mut session = session(HostModes::default());
        let mut segments = vec![
            session.new_segment(SegmentKind::Markdown, "# Title\nThe qwik fox"),
            session.new_segment(SegmentKind::Code, "let x = qwik;"),
            session.new_segment(SegmentKind::Raw, "qwik"),
        ];
        assert!(segments.iter().all(|s| session.flagged_words(s).is_empty()));

        session.toggle(&mut segments);
        let flagged = session.flagged_words(&segments[0]);
        assert_eq!(words(&flagged), vec!["qwik"]);
        assert_eq!((flagged[0].line, flagged[0].start, flagged[0].end), (1, 4, 8));

        let spans = session.highlight(&segments[0]);
        assert!(spans.iter().filter(|s| s.line == 0).all(|s| s.has_class("header")));

        assert_eq!(words(&session.flagged_words(&segments[1])), vec!["qwik"]);
        assert!(session.flagged_words(&segments[2]).is_empty());
    }

    #[test]
    fn new_segments_follow_state() {
        let mut session = session(HostModes::default());
        session.toggle(&mut []);

        let segment = session.new_segment(SegmentKind::Markdown, "brwn");
        assert_eq!(segment.mode(), &ModeSpec::new(SPELL_CHECK_MARKDOWN));
        assert_eq!(words(&session.flagged_words(&segment)), vec!["brwn"]);

        let mut segments = vec![segment];
        session.toggle(&mut segments);
        assert_eq!(segments[0].mode(), &ModeSpec::new(MarkdownMode::NAME));

        let segment = session.new_segment(SegmentKind::Code, "brwn");
        assert!(!segment.has_spell_overlay());
    }

    #[test]
    fn apply_is_idempotent() {
        let mut session = session(HostModes::default());
        let mut segments = vec![session.new_segment(SegmentKind::Heading, "Title")];
        session.toggle(&mut segments);
        let once = segments[0].clone();
        session.apply(&mut segments[0]);
        assert_eq!(segments[0], once);

        session.toggle(&mut segments);
        assert_eq!(segments[0].mode(), &ModeSpec::new(HeadingMode::NAME));
    }

    #[test]
    fn missing_heading_mode_is_skipped() {
        let host = HostModes {
            heading: None,
            ..HostModes::default()
        };
        let mut session = session(host);
        assert!(!session.registry().contains(&ModeSpec::new(SPELL_CHECK_HEADING)));

        let mut segments = vec![session.new_segment(SegmentKind::Heading, "Teh title")];
        let before = segments.clone();
        session.toggle(&mut segments);
        assert_eq!(segments, before);
        assert!(session.flagged_words(&segments[0]).is_empty());
    }

    #[test]
    fn unregistered_base_is_skipped() {
        let host = HostModes {
            markdown: ModeSpec::new("gfm"),
            ..HostModes::default()
        };
        let session = session(host);
        assert!(!session.registry().contains(&ModeSpec::new(SPELL_CHECK_MARKDOWN)));
        assert!(session.registry().contains(&ModeSpec::new(SPELL_CHECK_HEADING)));
    }

    #[test]
    fn custom_flag_style() {
        let lookup = DictionaryLookup::new();
        let overlay = SpellOverlay::new(lookup).with_style("typo".into());
        let mut session =
            SpellCheckSession::new(ModeRegistry::with_builtin(), overlay, HostModes::default());
        let mut segments = vec![session.new_segment(SegmentKind::Markdown, "anything")];
        session.toggle(&mut segments);

        let spans = session.highlight(&segments[0]);
        assert!(spans[0].has_class("typo"));
        assert!(!spans[0].has_class(FLAG_STYLE));
    }

    #[test]
    fn from_config() {
        let config = SpellCheckConfig {
            enabled: true,
            flag_style: "misspelled".into(),
            ..SpellCheckConfig::default()
        };
        let session = SpellCheckSession::from_config(
            ModeRegistry::with_builtin(),
            DictionaryLookup::new(),
            HostModes::default(),
            &config,
        );
        assert_eq!(session.state(), CheckState::On);
        assert_eq!(session.overlay().style(), &Style::new("misspelled"));

        let segment = session.new_segment(SegmentKind::Markdown, "word");
        assert_eq!(words(&session.flagged_words(&segment)), vec!["word"]);
    }

    #[test]
    fn empty_flag_style_flags_nothing() {
        let config = SpellCheckConfig {
            enabled: true,
            flag_style: "".into(),
            ..SpellCheckConfig::default()
        };
        let session = SpellCheckSession::from_config(
            ModeRegistry::with_builtin(),
            DictionaryLookup::new(),
            HostModes::default(),
            &config,
        );

        let segment = session.new_segment(SegmentKind::Markdown, "# Title\nwrod");
        assert!(session.flagged_words(&segment).is_empty());
    }
}
