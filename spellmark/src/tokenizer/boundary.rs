use hashbrown::HashSet;

use super::stream::StringStream;

/// Characters that never belong to a word: ASCII digits, ASCII punctuation
/// except the apostrophe, and the space character.
pub const BOUNDARY_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '!', '"', '#', '$', '%', '&', '(', ')', '*',
    '+', ',', '-', '.', '/', ':', ';', '<', '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{',
    '|', '}', '~', ' ',
];

/// One run of characters read by [`BoundarySet::next_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRun<'a> {
    /// Byte offset of the run within its line (or text, for [`super::Tokenize`]).
    pub index: usize,
    pub text: &'a str,
    pub is_word: bool,
}

/// The set of characters that terminate a word run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundarySet {
    chars: HashSet<char>,
}

impl Default for BoundarySet {
    fn default() -> BoundarySet {
        BoundarySet::new(BOUNDARY_CHARS.iter().copied())
    }
}

impl BoundarySet {
    pub fn new<I: IntoIterator<Item = char>>(chars: I) -> BoundarySet {
        BoundarySet {
            chars: chars.into_iter().collect(),
        }
    }

    #[inline]
    pub fn is_boundary(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// The inverted predicate: true for characters that are part of a word.
    #[inline]
    pub fn is_word_char(&self, ch: char) -> bool {
        !self.is_boundary(ch)
    }

    /// Reads the next run from `stream`, starting a new token at the cursor.
    ///
    /// A word run is the maximal run of word characters. A non-word run
    /// consumes at least one character and stops as soon as the next
    /// character would start a word. Returns `None` at end of line.
    pub fn next_token<'a>(&self, stream: &mut StringStream<'a>) -> Option<WordRun<'a>> {
        stream.begin_token();
        if stream.eol() {
            return None;
        }

        let is_word = if stream.match_char(|c| self.is_word_char(c), true) {
            stream.eat_while(|c| self.is_word_char(c));
            true
        } else {
            while stream.next().is_some() && !stream.match_char(|c| self.is_word_char(c), false) {}
            false
        };

        Some(WordRun {
            index: stream.start(),
            text: stream.current(),
            is_word,
        })
    }
}
