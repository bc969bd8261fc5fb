//! Editor modes: tokenizers that assign style classes to spans of a line,
//! and the machinery to layer one mode over another.
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::tokenizer::StringStream;

pub mod builtin;
pub mod error;
pub mod overlay;
pub mod registry;
pub mod spell;

pub use self::builtin::{HeadingMode, MarkdownMode, PlainMode};
pub use self::error::ModeError;
pub use self::overlay::{DocumentMode, OverlayMode, OverlayTokenizer};
pub use self::registry::ModeRegistry;
pub use self::spell::{SpellOverlay, SpellTag};

/// A space-separated list of style classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(SmolStr);

impl Style {
    pub fn new<S: Into<SmolStr>>(classes: S) -> Style {
        Style(classes.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Union of both class lists, keeping the order of first appearance.
    pub fn combine(&self, other: &Style) -> Style {
        let mut out = self.0.to_string();
        for class in other.classes().filter(|c| !self.has_class(c)) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(class);
        }
        Style(out.into())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Style {
    fn from(s: &str) -> Style {
        Style::new(s)
    }
}

/// Identifies a registered mode. Segments store this, not the mode itself,
/// so that switching modes back and forth restores an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeSpec(SmolStr);

impl ModeSpec {
    pub fn new<S: Into<SmolStr>>(name: S) -> ModeSpec {
        ModeSpec(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModeSpec {
    fn from(s: &str) -> ModeSpec {
        ModeSpec::new(s)
    }
}

/// A named tokenizer factory.
pub trait Mode: Send + Sync {
    fn name(&self) -> &str;

    /// A tokenizer in its start state. Each highlighting pass owns its own.
    fn tokenizer(&self) -> Box<dyn Tokenizer>;
}

/// Reads one token per call from a line.
///
/// Called with `stream.start() == stream.pos()` and the stream not at end of
/// line; must consume at least one character.
pub trait Tokenizer {
    fn token(&mut self, stream: &mut StringStream<'_>) -> Option<Style>;

    /// Called instead of `token` for empty lines.
    fn blank_line(&mut self) {}
}

impl<M: Mode + ?Sized> Mode for Arc<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn tokenizer(&self) -> Box<dyn Tokenizer> {
        (**self).tokenizer()
    }
}

/// A styled byte range of one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSpan {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub style: Option<Style>,
}

impl StyledSpan {
    pub fn has_class(&self, class: &str) -> bool {
        self.style.as_ref().map(|s| s.has_class(class)).unwrap_or(false)
    }

    /// The span's text within its line.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.start..self.end).unwrap_or("")
    }
}

/// A word the overlay flagged, located by line and byte range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedWord {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub word: SmolStr,
}

/// Picks the spans of `text` that carry every class of `style`. An empty
/// style flags nothing.
pub fn flagged_spans(style: &Style, text: &str, spans: &[StyledSpan]) -> Vec<FlaggedWord> {
    if style.classes().next().is_none() {
        return vec![];
    }

    let lines = text.lines().collect::<Vec<_>>();
    spans
        .iter()
        .filter(|span| style.classes().all(|c| span.has_class(c)))
        .map(|span| FlaggedWord {
            line: span.line,
            start: span.start,
            end: span.end,
            word: lines
                .get(span.line)
                .map(|line| span.text(line))
                .unwrap_or("")
                .into(),
        })
        .collect()
}

/// Runs `mode` over `text` line by line.
pub fn highlight(mode: &dyn Mode, text: &str) -> Vec<StyledSpan> {
    let mut tokenizer = mode.tokenizer();
    highlight_with(tokenizer.as_mut(), text)
}

/// Runs an existing tokenizer over `text`, continuing from its current
/// state. Adjacent spans with the same style are merged.
pub fn highlight_with(tokenizer: &mut dyn Tokenizer, text: &str) -> Vec<StyledSpan> {
    let mut spans = vec![];

    for (n, line) in text.lines().enumerate() {
        if line.is_empty() {
            tokenizer.blank_line();
            continue;
        }

        let mut stream = StringStream::with_line(line, n);
        while !stream.eol() {
            let start = stream.pos();
            stream.begin_token();
            let style = tokenizer.token(&mut stream);

            if stream.pos() <= start {
                log::warn!("Tokenizer failed to advance on line {} at {}", n, start);
                stream.set_pos(start);
                stream.next();
            }

            spans.push(StyledSpan {
                line: n,
                start,
                end: stream.pos(),
                style,
            });
        }
    }

    spans
        .into_iter()
        .coalesce(|a, b| {
            if a.line == b.line && a.end == b.start && a.style == b.style {
                Ok(StyledSpan { end: b.end, ..a })
            } else {
                Err((a, b))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_a_union() {
        let a = Style::new("header header-1");
        let b = Style::new("spell-error header");
        assert_eq!(a.combine(&b).as_str(), "header header-1 spell-error");
        assert_eq!(Style::new("").combine(&b).as_str(), "spell-error header");
        assert!(a.combine(&b).has_class("spell-error"));
    }

    struct Stuck;

    impl Tokenizer for Stuck {
        fn token(&mut self, _stream: &mut StringStream<'_>) -> Option<Style> {
            Some(Style::new("stuck"))
        }
    }

    #[test]
    fn forces_progress() {
        let spans = highlight_with(&mut Stuck, "ab");
        assert_eq!(
            spans,
            vec![StyledSpan {
                line: 0,
                start: 0,
                end: 2,
                style: Some(Style::new("stuck"))
            }]
        );
    }

    #[test]
    fn flagged_spans_need_every_class() {
        let text = "ab cd\nef";
        let span = |line, start, end, style: Option<&str>| StyledSpan {
            line,
            start,
            end,
            style: style.map(Style::new),
        };
        let spans = vec![
            span(0, 0, 2, Some("header spell-error")),
            span(0, 2, 3, Some("header")),
            span(0, 3, 5, Some("spell-error")),
            span(1, 0, 2, None),
        ];

        let flagged = flagged_spans(&Style::new("spell-error"), text, &spans);
        assert_eq!(
            flagged.iter().map(|w| (w.line, w.word.as_str())).collect::<Vec<_>>(),
            vec![(0, "ab"), (0, "cd")]
        );
        assert_eq!((flagged[1].start, flagged[1].end), (3, 5));

        assert!(flagged_spans(&Style::new(""), text, &spans).is_empty());
        assert!(flagged_spans(&Style::new("  "), text, &spans).is_empty());
    }

    #[test]
    fn merges_and_skips_blank_lines() {
        let spans = highlight(&PlainMode, "one\n\nthree");
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[1].line, spans[1].start, spans[1].end), (2, 0, 5));
        assert_eq!(spans[1].text("three"), "three");
    }
}
