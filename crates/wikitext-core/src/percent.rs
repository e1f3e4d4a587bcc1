//! Percent-encoding for URLs and file URIs.
//!
//! Unreserved characters (RFC 3986: letters, digits, `-_.~`) are never
//! escaped. Non-ASCII text is escaped as its UTF-8 bytes, one `%XX` per byte.
//!
//! Every byte of a multi-byte UTF-8 sequence is in `0x80..=0xFF`, so a run of
//! `%8X`..`%FX` escapes can never contain an escaped ASCII char such as `%`.
//! Decoding relies on this: each escape in the input is read exactly once,
//! ASCII escapes become their char and contiguous high-byte escapes are
//! decoded together as UTF-8 where they form valid UTF-8.

use regex::{Captures, Regex};
use std::fmt::Write;
use std::sync::OnceLock;

/// Which characters [`percent_encode`] leaves alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeMode {
    /// Escape everything except unreserved characters.
    /// For query data, e.g. `mailto:?subject=...`.
    Data,
    /// Like [`EncodeMode::Data`] but keeps `/`. For file paths.
    #[default]
    Path,
    /// Escape only space and non-ASCII characters. Existing escapes and
    /// reserved characters are kept, so this is safe on encoded URLs.
    Readable,
}

impl EncodeMode {
    /// Returns true if `c` is written as is in this mode.
    pub fn keeps(self, c: char) -> bool {
        match self {
            EncodeMode::Data => is_unreserved(c),
            EncodeMode::Path => is_unreserved(c) || c == '/',
            EncodeMode::Readable => c != ' ' && c.is_ascii(),
        }
    }
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

/// Percent-encodes `input` according to `mode`.
///
/// [`EncodeMode::Data`] and [`EncodeMode::Path`] must only be applied to text
/// that is not encoded yet, otherwise `%` is escaped again. Their output is
/// pure ASCII.
pub fn percent_encode(input: &str, mode: EncodeMode) -> String {
    percent_encode_with(input, |c| mode.keeps(c))
}

/// Percent-encodes every char for which `keep` returns false.
///
/// The char is written as its UTF-8 bytes, each as `%XX` with uppercase hex.
pub fn percent_encode_with<F>(input: &str, keep: F) -> String
where
    F: Fn(char) -> bool,
{
    let mut out = String::with_capacity(input.len());
    let mut buf = [0u8; 4];
    for c in input.chars() {
        if keep(c) {
            out.push(c);
        } else {
            for b in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

/// Replaces percent escapes with the characters they stand for.
///
/// [`EncodeMode::Data`] and [`EncodeMode::Path`] decode every ASCII escape.
/// [`EncodeMode::Readable`] only decodes `%20`, so reserved characters stay
/// escaped and the result must be re-encoded with `Readable` before it is
/// handed to another program.
///
/// In all modes runs of high-byte escapes (`%80`..`%FF`) are decoded only
/// when the run is valid UTF-8. Runs that are not are kept escaped, as they
/// were presumably encoded from some other charset.
pub fn percent_decode(input: &str, mode: EncodeMode) -> String {
    escape_run_regex()
        .replace_all(input, |caps: &Captures| decode_run(&caps[0], mode))
        .into_owned()
}

/// Runs of `%XX` escapes.
fn escape_run_regex() -> &'static Regex {
    static ESCAPE_RUNS: OnceLock<Regex> = OnceLock::new();
    ESCAPE_RUNS.get_or_init(|| {
        Regex::new(r"(?:%[0-9a-fA-F]{2})+").expect("Invalid escape run regex")
    })
}

/// Decodes one run of escapes. Escape `i` of the run is `run[3 * i..3 * i + 3]`.
fn decode_run(run: &str, mode: EncodeMode) -> String {
    let bytes = escaped_bytes(run);
    let mut out = String::with_capacity(run.len());
    let mut high_start = None;
    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii() {
            high_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = high_start.take() {
            push_utf8(&mut out, &bytes[start..i], &run[3 * start..3 * i]);
        }
        match mode {
            EncodeMode::Readable if b != b' ' => out.push_str(&run[3 * i..3 * i + 3]),
            _ => out.push(char::from(b)),
        }
    }
    if let Some(start) = high_start {
        push_utf8(&mut out, &bytes[start..], &run[3 * start..]);
    }
    out
}

fn push_utf8(out: &mut String, bytes: &[u8], escaped: &str) {
    match std::str::from_utf8(bytes) {
        Ok(decoded) => out.push_str(decoded),
        Err(_) => {
            log::debug!("Leaving {escaped} encoded: not valid UTF-8");
            out.push_str(escaped);
        }
    }
}

/// Turns a run of `%XX` escapes into the bytes it encodes.
fn escaped_bytes(run: &str) -> Vec<u8> {
    run.as_bytes()
        .chunks(3)
        .filter_map(|chunk| std::str::from_utf8(chunk.get(1..3)?).ok())
        .filter_map(|hex| u8::from_str_radix(hex, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("a b/c", EncodeMode::Path, "a%20b/c")]
    #[case("a b/c", EncodeMode::Data, "a%20b%2Fc")]
    #[case("a b/c", EncodeMode::Readable, "a%20b/c")]
    #[case("Az09-_.~", EncodeMode::Data, "Az09-_.~")]
    #[case("?x=1&y=2", EncodeMode::Data, "%3Fx%3D1%26y%3D2")]
    #[case("?x=1&y=2", EncodeMode::Readable, "?x=1&y=2")]
    #[case("100%", EncodeMode::Path, "100%25")]
    #[case("100%25", EncodeMode::Readable, "100%25")]
    #[case("café", EncodeMode::Path, "caf%C3%A9")]
    #[case("café au lait", EncodeMode::Readable, "caf%C3%A9%20au%20lait")]
    #[case("\u{1F600}", EncodeMode::Data, "%F0%9F%98%80")]
    #[case("", EncodeMode::Data, "")]
    fn encode_cases(#[case] input: &str, #[case] mode: EncodeMode, #[case] expected: &str) {
        assert_eq!(percent_encode(input, mode), expected);
    }

    #[rstest]
    #[case("a%20b", EncodeMode::Readable, "a b")]
    #[case("a%41b", EncodeMode::Readable, "a%41b")]
    #[case("caf%C3%A9%20x", EncodeMode::Readable, "café x")]
    #[case("a%41b", EncodeMode::Data, "aAb")]
    #[case("a%2fb%2F", EncodeMode::Path, "a/b/")]
    #[case("caf%c3%a9", EncodeMode::Data, "café")]
    #[case("100%", EncodeMode::Data, "100%")]
    #[case("%zz", EncodeMode::Data, "%zz")]
    #[case("%4", EncodeMode::Data, "%4")]
    fn decode_cases(#[case] input: &str, #[case] mode: EncodeMode, #[case] expected: &str) {
        assert_eq!(percent_decode(input, mode), expected);
    }

    #[test]
    fn invalid_utf8_run_is_left_encoded() {
        // latin-1 "é" is a lone 0xE9 byte
        assert_eq!(percent_decode("caf%E9", EncodeMode::Data), "caf%E9");
    }

    #[test]
    fn only_the_invalid_run_is_left_encoded() {
        assert_eq!(
            percent_decode("%E9%20caf%C3%A9", EncodeMode::Path),
            "%E9 café"
        );
    }

    #[test]
    fn ascii_escape_is_not_merged_into_utf8_run() {
        // %25 decodes to "%" on its own; it never becomes part of the é bytes
        assert_eq!(percent_decode("%25%C3%A9", EncodeMode::Data), "%é");
    }

    #[rstest]
    #[case(EncodeMode::Data)]
    #[case(EncodeMode::Path)]
    fn decoded_percent_does_not_start_an_escape(#[case] mode: EncodeMode) {
        assert_eq!(percent_decode("%25C3%25A9", mode), "%C3%A9");
        assert_eq!(percent_decode("%2541", mode), "%41");
    }

    #[test]
    fn data_roundtrip() {
        let samples = [
            "plain",
            "with space/and slash",
            "reserved ;/?:@&=+$,",
            "100% sure",
            "naïve café \u{1F600}",
            "tab\tand\nnewline",
            "%C3%A9",
            "100%25",
        ];
        for sample in samples {
            let encoded = percent_encode(sample, EncodeMode::Data);
            assert!(encoded.is_ascii(), "{encoded} should be ASCII");
            assert_eq!(percent_decode(&encoded, EncodeMode::Data), sample);
        }
    }

    #[test]
    fn readable_encode_is_idempotent() {
        let once = percent_encode("a b ü", EncodeMode::Readable);
        assert_eq!(percent_encode(&once, EncodeMode::Readable), once);
    }

    #[test]
    fn custom_keep_function() {
        let encoded = percent_encode_with("a:b c", |c| c != ':');
        assert_eq!(encoded, "a%3Ab c");
    }

    #[test]
    fn default_mode_is_path() {
        assert_eq!(EncodeMode::default(), EncodeMode::Path);
    }
}
