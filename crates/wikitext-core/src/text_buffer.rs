/// Pieces of text that are only turned into lines when asked for.
///
/// Parsers that emit text in arbitrary chunks push them here and call
/// [`get_lines`](Self::get_lines) once they need whole lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    pieces: Vec<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, piece: impl Into<String>) {
        self.pieces.push(piece.into());
    }

    pub fn pieces(&self) -> &[String] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.iter().all(String::is_empty)
    }

    /// Joins all pieces and splits the result after each `\n`.
    ///
    /// Lines keep their `\n`. With `end_with_newline`, a last line without
    /// one gets it added.
    pub fn get_lines(&self, end_with_newline: bool) -> Vec<String> {
        let joined = self.pieces.concat();
        let mut lines: Vec<String> = joined.split_inclusive('\n').map(str::to_string).collect();
        if end_with_newline
            && let Some(last) = lines.last_mut()
            && !last.ends_with('\n')
        {
            last.push('\n');
        }
        lines
    }

    /// Replaces the content with the same lines, each starting with `prefix`.
    ///
    /// A missing newline at the end is not added.
    pub fn prefix_lines(&mut self, prefix: &str) {
        self.pieces = self
            .get_lines(false)
            .into_iter()
            .map(|line| format!("{prefix}{line}"))
            .collect();
    }
}

impl<S: Into<String>> Extend<S> for TextBuffer {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.pieces.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for TextBuffer {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}
