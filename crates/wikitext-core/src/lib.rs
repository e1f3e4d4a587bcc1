//! # wikitext-core
//!
//! Small string toolkit used by the wiki parser and the link renderer.
//!
//! ## Modules
//!
//! - **`escape`**: backslash escaping and escape-aware splitting
//! - **`percent`**: percent-encoding with the three [`EncodeMode`]s
//! - **`links`**: anchored link patterns, [`uri_scheme`] and [`link_type`]
//! - **`cursor`**: [`MatchCursor`], a regex that remembers its last match,
//!   plus [`MatchCursor::substitute_list`] for layered tokenizing
//! - **`date`**: lenient `(year, month, day)` extraction from page names
//! - **`text_buffer`**: [`TextBuffer`], text fragments recombined into lines
//!
//! Everything except [`MatchCursor`] is a pure function over `&str`.
//!
//! ```
//! use wikitext_core::{EncodeMode, LinkType, link_type, percent_encode};
//!
//! assert_eq!(percent_encode("a b/c", EncodeMode::Path), "a%20b/c");
//! assert_eq!(link_type("wp?Some_Page"), LinkType::Interwiki);
//! ```

pub mod cursor;
pub mod date;
pub mod error;
pub mod escape;
pub mod links;
pub mod percent;
pub mod text_buffer;

// Dates in the public API are chrono dates.
pub use chrono::NaiveDate;
pub use cursor::{CursorFlags, Fragment, MatchCursor};
pub use date::{ParsedDate, YearPolicy, parse_date, parse_date_on};
pub use error::CursorError;
pub use escape::{escape, split_escaped, unescape};
pub use links::{
    LinkType, ShareStyle, is_interwiki_keyword, is_win32_path, link_type,
    normalize_share_path, normalize_win32_share, uri_scheme, url_cursor, url_pattern,
    valid_interwiki_key,
};
pub use percent::{EncodeMode, percent_decode, percent_encode, percent_encode_with};
pub use text_buffer::TextBuffer;
