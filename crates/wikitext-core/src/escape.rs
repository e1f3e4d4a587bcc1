//! Backslash escapes for values stored on a single line.
//!
//! Newline and tab get mnemonic letters (`\n`, `\t`); carriage return is
//! written as `\r`. Every other escaped character is simply prefixed with a
//! backslash, so [`unescape`] only needs to know about `n` and `t`.

/// Escapes newline, carriage return, tab, backslash and every char in `extra`.
pub fn escape(text: &str, extra: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c if extra.contains(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`].
///
/// `\n` and `\t` become newline and tab; any other `\X` becomes `X`. A
/// backslash at the very end, or followed by a newline, is kept as is.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(next) if next != '\n' => out.push(next),
            _ => {
                out.push('\\');
                continue;
            }
        }
        chars.next();
    }
    out
}

/// Splits `text` on every `sep` that is not escaped.
///
/// A separator counts as escaped when it follows an odd number of
/// backslashes. The escapes themselves are left in the pieces; run
/// [`unescape`] on each piece if needed.
pub fn split_escaped(text: &str, sep: char) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut rejoin = false;
    for piece in text.split(sep) {
        match parts.last_mut() {
            Some(last) if rejoin => {
                last.push(sep);
                last.push_str(piece);
            }
            _ => parts.push(piece.to_string()),
        }
        let trailing = piece.len() - piece.trim_end_matches('\\').len();
        rejoin = trailing % 2 == 1;
    }
    parts
}
