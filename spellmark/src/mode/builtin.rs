//! Small host modes: plain text, a Markdown subset, and headings.
use super::{Mode, Style, Tokenizer};
use crate::tokenizer::StringStream;

/// No styling at all; each line is a single token.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMode;

impl PlainMode {
    pub const NAME: &'static str = "text/plain";
}

impl Tokenizer for PlainMode {
    fn token(&mut self, stream: &mut StringStream<'_>) -> Option<Style> {
        stream.skip_to_end();
        None
    }
}

impl Mode for PlainMode {
    fn name(&self) -> &str {
        PlainMode::NAME
    }

    fn tokenizer(&self) -> Box<dyn Tokenizer> {
        Box::new(PlainMode)
    }
}

/// Every line is a heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingMode;

impl HeadingMode {
    pub const NAME: &'static str = "heading";
}

impl Tokenizer for HeadingMode {
    fn token(&mut self, stream: &mut StringStream<'_>) -> Option<Style> {
        stream.skip_to_end();
        Some(Style::new("header"))
    }
}

impl Mode for HeadingMode {
    fn name(&self) -> &str {
        HeadingMode::NAME
    }

    fn tokenizer(&self) -> Box<dyn Tokenizer> {
        Box::new(HeadingMode)
    }
}

/// ATX headings, block quotes, fenced code, inline code, and `*`/`_`
/// emphasis. Emphasis does not carry over blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownMode;

impl MarkdownMode {
    pub const NAME: &'static str = "markdown";

    pub fn new() -> MarkdownMode {
        MarkdownMode
    }
}

impl Mode for MarkdownMode {
    fn name(&self) -> &str {
        MarkdownMode::NAME
    }

    fn tokenizer(&self) -> Box<dyn Tokenizer> {
        Box::new(MarkdownTokenizer::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkdownTokenizer {
    in_fence: bool,
    strong: bool,
    em: bool,
}

fn is_inline_special(ch: char) -> bool {
    matches!(ch, '`' | '*' | '_')
}

impl MarkdownTokenizer {
    fn inline_style(&self) -> Option<Style> {
        match (self.strong, self.em) {
            (true, true) => Some(Style::new("strong em")),
            (true, false) => Some(Style::new("strong")),
            (false, true) => Some(Style::new("em")),
            (false, false) => None,
        }
    }

    fn heading_level(stream: &StringStream<'_>) -> Option<usize> {
        let rest = &stream.string()[stream.pos()..];
        let level = rest.chars().take_while(|c| *c == '#').count();
        let after = rest[level..].chars().next();

        match (level, after) {
            (1..=6, None) | (1..=6, Some(' ')) => Some(level),
            _ => None,
        }
    }
}

impl Tokenizer for MarkdownTokenizer {
    fn token(&mut self, stream: &mut StringStream<'_>) -> Option<Style> {
        if stream.sol() && stream.match_str("```", false) {
            self.in_fence = !self.in_fence;
            stream.skip_to_end();
            return Some(Style::new("comment formatting"));
        }

        if self.in_fence {
            stream.skip_to_end();
            return Some(Style::new("comment"));
        }

        if stream.sol() {
            if let Some(level) = MarkdownTokenizer::heading_level(stream) {
                stream.skip_to_end();
                return Some(Style::new(format!("header header-{level}")));
            }

            if stream.match_str(">", true) {
                stream.eat_while(|c| c == ' ');
                return Some(Style::new("quote"));
            }
        }

        match stream.peek() {
            Some('`') => {
                stream.next();
                if stream.skip_to('`') {
                    stream.next();
                } else {
                    stream.skip_to_end();
                }
                Some(Style::new("comment"))
            }
            Some(ch @ ('*' | '_')) => {
                let before = self.inline_style();
                stream.eat_while(|c| c == ch);
                if stream.current().chars().count() >= 2 {
                    self.strong = !self.strong;
                } else {
                    self.em = !self.em;
                }
                let after = self.inline_style();
                let marker = Style::new("formatting");
                Some(match before.or(after) {
                    Some(style) => style.combine(&marker),
                    None => marker,
                })
            }
            _ => {
                stream.eat_while(|c| !is_inline_special(c));
                self.inline_style()
            }
        }
    }

    fn blank_line(&mut self) {
        self.strong = false;
        self.em = false;
    }
}
