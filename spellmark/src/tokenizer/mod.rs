//! Word boundary scanning.
//!
//! Text is scanned one line at a time, the way an editor feeds its modes:
//! line terminators are never part of a run.
mod boundary;
mod stream;

pub use self::boundary::{BoundarySet, WordRun, BOUNDARY_CHARS};
pub use self::stream::StringStream;

pub trait Tokenize {
    fn word_runs(&self) -> WordRuns<'_>;
    fn words(&self) -> Words<'_>;

    fn word_runs_with_boundaries(&self, boundaries: BoundarySet) -> WordRuns<'_>;
}

impl Tokenize for str {
    fn word_runs(&self) -> WordRuns<'_> {
        WordRuns::new(self, BoundarySet::default())
    }

    fn words(&self) -> Words<'_> {
        Words(self.word_runs())
    }

    fn word_runs_with_boundaries(&self, boundaries: BoundarySet) -> WordRuns<'_> {
        WordRuns::new(self, boundaries)
    }
}

/// Iterator over the runs of a text. Indices are byte offsets into the whole
/// text.
pub struct WordRuns<'a> {
    boundaries: BoundarySet,
    lines: std::str::SplitInclusive<'a, char>,
    stream: Option<StringStream<'a>>,
    line_offset: usize,
    next_offset: usize,
}

impl<'a> WordRuns<'a> {
    fn new(text: &'a str, boundaries: BoundarySet) -> WordRuns<'a> {
        WordRuns {
            boundaries,
            lines: text.split_inclusive('\n'),
            stream: None,
            line_offset: 0,
            next_offset: 0,
        }
    }
}

impl<'a> Iterator for WordRuns<'a> {
    type Item = WordRun<'a>;

    fn next(&mut self) -> Option<WordRun<'a>> {
        loop {
            if let Some(stream) = self.stream.as_mut() {
                if let Some(mut run) = self.boundaries.next_token(stream) {
                    run.index += self.line_offset;
                    return Some(run);
                }
            }

            let raw = self.lines.next()?;
            self.line_offset = self.next_offset;
            self.next_offset += raw.len();
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            let line = line.strip_suffix('\r').unwrap_or(line);
            self.stream = Some(StringStream::new(line));
        }
    }
}

/// Word runs only.
pub struct Words<'a>(WordRuns<'a>);

impl<'a> Iterator for Words<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<(usize, &'a str)> {
        self.0
            .by_ref()
            .find(|run| run.is_word)
            .map(|run| (run.index, run.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(text: &str) -> Vec<(&str, bool)> {
        text.word_runs().map(|r| (r.text, r.is_word)).collect()
    }

    #[test]
    fn sentence() {
        assert_eq!(
            pairs("The qwik brown fox."),
            vec![
                ("The", true),
                (" ", false),
                ("qwik", true),
                (" ", false),
                ("brown", true),
                (" ", false),
                ("fox", true),
                (".", false),
            ]
        );
    }

    #[test]
    fn offsets_span_lines() {
        let msg = "one two\r\n(three)\n\nfour";
        assert_eq!(
            msg.word_runs()
                .map(|r| (r.index, r.text))
                .collect::<Vec<_>>(),
            vec![
                (0, "one"),
                (3, " "),
                (4, "two"),
                (9, "("),
                (10, "three"),
                (15, ")"),
                (18, "four")
            ]
        );
        assert_eq!(
            msg.words().collect::<Vec<_>>(),
            vec![(0, "one"), (4, "two"), (10, "three"), (18, "four")]
        );
    }

    fn boundary_string() -> impl Strategy<Value = String> {
        proptest::collection::vec(proptest::sample::select(BOUNDARY_CHARS), 1..40)
            .prop_map(|chars| chars.into_iter().collect())
    }

    fn word_string() -> impl Strategy<Value = String> {
        "[a-zA-Z'éüßж\t]{1,40}"
    }

    proptest! {
        #[test]
        fn boundary_only_text_is_one_non_word_run(text in boundary_string()) {
            let runs = pairs(&text);
            prop_assert_eq!(runs, vec![(text.as_str(), false)]);
        }

        #[test]
        fn word_only_text_is_one_word_run(text in word_string()) {
            let runs = pairs(&text);
            prop_assert_eq!(runs, vec![(text.as_str(), true)]);
        }

        #[test]
        fn rescanning_is_stable(text in "[a-z' .,0-9!?-]{0,60}") {
            prop_assert_eq!(pairs(&text), pairs(&text));
        }

        #[test]
        fn runs_cover_the_line(text in "[a-z' .,0-9!?-]{0,60}") {
            let joined: String = text.word_runs().map(|r| r.text).collect();
            prop_assert_eq!(joined, text);
        }
    }
}
