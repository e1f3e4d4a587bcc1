use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use regex::{Captures, Regex, RegexBuilder};

use crate::error::CursorError;

/// Compile options for [`MatchCursor::with_flags`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
}

impl CursorFlags {
    fn build(self, pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .build()
    }
}

/// One item of a token stream fed through [`MatchCursor::substitute_list`].
///
/// `Text` is still untokenized and gets scanned; `Token` is passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<T> {
    Text(String),
    Token(T),
}

impl<T> Fragment<T> {
    pub fn text(s: impl Into<String>) -> Self {
        Fragment::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fragment::Text(s) => Some(s),
            Fragment::Token(_) => None,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Fragment::Token(_))
    }
}

/// Group spans of a successful match, plus the text they index into.
#[derive(Clone)]
struct LastMatch {
    text: Arc<str>,
    groups: Vec<Option<Range<usize>>>,
}

impl LastMatch {
    fn from_captures(text: Arc<str>, caps: &Captures<'_>) -> Self {
        let groups = caps.iter().map(|g| g.map(|m| m.range())).collect();
        Self { text, groups }
    }
}

/// A compiled regex that remembers its most recent match.
///
/// ```
/// use wikitext_core::MatchCursor;
///
/// let mut interwiki = MatchCursor::new(r"^(\w[\w+\-.]+)\?(.*)").unwrap();
/// if interwiki.match_start("wp?Rust") {
///     assert_eq!(interwiki.group(1), Some("wp"));
///     assert_eq!(interwiki.group(2), Some("Rust"));
/// }
/// ```
///
/// Every call to [`match_start`](Self::match_start), [`search`](Self::search)
/// or [`substitute_list`](Self::substitute_list) replaces the stored match, so
/// one cursor must not be shared by interleaved scans. Use one cursor per
/// scan (per thread or task).
///
/// Group access before a successful match is a bug in the caller: the plain
/// accessors panic, the `try_` variants return [`CursorError`].
#[derive(Clone)]
pub struct MatchCursor {
    pattern: String,
    regex: Regex,
    last: Option<LastMatch>,
}

impl MatchCursor {
    pub fn new(pattern: &str) -> Result<Self, CursorError> {
        Self::with_flags(pattern, CursorFlags::default())
    }

    pub fn with_flags(pattern: &str, flags: CursorFlags) -> Result<Self, CursorError> {
        let regex = flags.build(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            last: None,
        })
    }

    /// The source pattern this cursor was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Matches at the start of `text` only. Returns whether it matched.
    ///
    /// The leftmost match is taken and kept only if it starts at offset 0.
    pub fn match_start(&mut self, text: &str) -> bool {
        let last = self
            .regex
            .captures(text)
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0))
            .map(|caps| LastMatch::from_captures(Arc::from(text), &caps));
        self.store(last)
    }

    /// Finds the first match anywhere in `text`. Returns whether it matched.
    pub fn search(&mut self, text: &str) -> bool {
        let last = self
            .regex
            .captures(text)
            .map(|caps| LastMatch::from_captures(Arc::from(text), &caps));
        self.store(last)
    }

    fn store(&mut self, last: Option<LastMatch>) -> bool {
        self.last = last;
        self.last.is_some()
    }

    pub fn is_matched(&self) -> bool {
        self.last.is_some()
    }

    /// Number of groups including the whole match, or 0 without a match.
    pub fn len(&self) -> usize {
        self.last.as_ref().map_or(0, |m| m.groups.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Span of `group` in the last match; `None` if the group did not take part.
    pub fn try_span(&self, group: usize) -> Result<Option<Range<usize>>, CursorError> {
        let last = self.last.as_ref().ok_or(CursorError::NoMatch)?;
        last.groups
            .get(group)
            .cloned()
            .ok_or(CursorError::NoSuchGroup {
                group,
                groups: self.regex.captures_len(),
            })
    }

    pub fn try_group(&self, group: usize) -> Result<Option<&str>, CursorError> {
        let span = self.try_span(group)?;
        Ok(span.and_then(|span| self.last.as_ref().map(|m| &m.text[span])))
    }

    pub fn try_start(&self, group: usize) -> Result<Option<usize>, CursorError> {
        Ok(self.try_span(group)?.map(|span| span.start))
    }

    pub fn try_end(&self, group: usize) -> Result<Option<usize>, CursorError> {
        Ok(self.try_span(group)?.map(|span| span.end))
    }

    /// Text of `group` in the last match.
    ///
    /// # Panics
    /// Without a current match, or if the pattern has no such group.
    pub fn group(&self, group: usize) -> Option<&str> {
        self.try_group(group).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Span of `group` in the last match.
    ///
    /// # Panics
    /// Same as [`group`](Self::group).
    pub fn span(&self, group: usize) -> Option<Range<usize>> {
        self.try_span(group).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Byte offset where `group` starts. Group 0 is the whole match.
    ///
    /// # Panics
    /// Same as [`group`](Self::group).
    pub fn start(&self, group: usize) -> Option<usize> {
        self.try_start(group).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Byte offset where `group` ends. Group 0 is the whole match.
    ///
    /// # Panics
    /// Same as [`group`](Self::group).
    pub fn end(&self, group: usize) -> Option<usize> {
        self.try_end(group).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Like a regex substitution, but over a list that mixes text and tokens.
    ///
    /// Each [`Fragment::Text`] is scanned for matches. Every match becomes a
    /// [`Fragment::Token`] built by `repl`, which sees this cursor positioned
    /// on that match. Text before, between and after matches is kept as
    /// separate `Text` fragments; empty ones are dropped. Tokens in the input
    /// are passed through in place.
    ///
    /// Feeding the output through cursors with other patterns builds a simple
    /// tokenizer, one token kind per pass.
    pub fn substitute_list<T, F>(&mut self, mut repl: F, items: Vec<Fragment<T>>) -> Vec<Fragment<T>>
    where
        F: FnMut(&MatchCursor) -> T,
    {
        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let text: Arc<str> = match item {
                Fragment::Text(text) => Arc::from(text),
                token => {
                    result.push(token);
                    continue;
                }
            };

            let matches: Vec<LastMatch> = self
                .regex
                .captures_iter(&text)
                .map(|caps| LastMatch::from_captures(Arc::clone(&text), &caps))
                .collect();

            let mut pos = 0;
            for found in matches {
                let Some(whole) = found.groups.first().cloned().flatten() else {
                    continue;
                };
                if whole.start > pos {
                    result.push(Fragment::Text(text[pos..whole.start].to_string()));
                }
                pos = whole.end;
                self.last = Some(found);
                result.push(Fragment::Token(repl(&*self)));
            }
            if pos < text.len() {
                result.push(Fragment::Text(text[pos..].to_string()));
            }
        }
        result
    }
}

impl fmt::Display for MatchCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl fmt::Debug for MatchCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchCursor")
            .field("pattern", &self.pattern)
            .field("matched", &self.is_matched())
            .finish()
    }
}
