//! A cursor over a single line of text, shared by every tokenizer that runs
//! over that line.

/// Cursor over one line of a document.
///
/// `start` marks the beginning of the token currently being read and `pos`
/// the next unconsumed byte. Both are byte offsets that always fall on
/// `char` boundaries.
#[derive(Debug, Clone)]
pub struct StringStream<'a> {
    string: &'a str,
    line: usize,
    start: usize,
    pos: usize,
}

impl<'a> StringStream<'a> {
    pub fn new(string: &'a str) -> StringStream<'a> {
        StringStream::with_line(string, 0)
    }

    /// Creates a stream for the given zero-based line number of a document.
    pub fn with_line(string: &'a str, line: usize) -> StringStream<'a> {
        StringStream {
            string,
            line,
            start: 0,
            pos: 0,
        }
    }

    #[inline]
    pub fn string(&self) -> &'a str {
        self.string
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the cursor. Offsets past the end or inside a `char` are clamped
    /// back to the closest preceding boundary.
    pub fn set_pos(&mut self, pos: usize) {
        let mut pos = pos.min(self.string.len());
        while !self.string.is_char_boundary(pos) {
            pos -= 1;
        }
        self.pos = pos;
    }

    /// Marks the cursor position as the start of a new token.
    #[inline]
    pub fn begin_token(&mut self) {
        self.start = self.pos;
    }

    #[inline]
    pub fn eol(&self) -> bool {
        self.pos >= self.string.len()
    }

    #[inline]
    pub fn sol(&self) -> bool {
        self.pos == 0
    }

    /// Returns the character under the cursor without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.string[self.pos..].chars().next()
    }

    /// Consumes and returns the character under the cursor.
    #[inline]
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes the next character if it satisfies `pred`.
    pub fn eat<P: Fn(char) -> bool>(&mut self, pred: P) -> Option<char> {
        match self.peek() {
            Some(ch) if pred(ch) => {
                self.pos += ch.len_utf8();
                Some(ch)
            }
            _ => None,
        }
    }

    /// Consumes characters while `pred` holds. Returns whether anything was
    /// consumed.
    pub fn eat_while<P: Fn(char) -> bool>(&mut self, pred: P) -> bool {
        let start = self.pos;
        while self.eat(&pred).is_some() {}
        self.pos > start
    }

    /// Tests the next character against `pred`, consuming it only when
    /// `consume` is set and the test succeeds.
    pub fn match_char<P: Fn(char) -> bool>(&mut self, pred: P, consume: bool) -> bool {
        if consume {
            self.eat(pred).is_some()
        } else {
            self.peek().map(pred).unwrap_or(false)
        }
    }

    /// Tests whether the remaining text begins with `pattern`.
    pub fn match_str(&mut self, pattern: &str, consume: bool) -> bool {
        if self.string[self.pos..].starts_with(pattern) {
            if consume {
                self.pos += pattern.len();
            }
            true
        } else {
            false
        }
    }

    /// Consumes up to (not including) the next occurrence of `ch`. Returns
    /// false and leaves the cursor alone if `ch` does not occur.
    pub fn skip_to(&mut self, ch: char) -> bool {
        match self.string[self.pos..].find(ch) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => false,
        }
    }

    pub fn skip_to_end(&mut self) {
        self.pos = self.string.len();
    }

    /// The text consumed since the last token boundary.
    #[inline]
    pub fn current(&self) -> &'a str {
        &self.string[self.start..self.pos]
    }
}
