//! Classifying link targets found in wiki text.
//!
//! A link is either an external resource (URL, email, file path, share) or a
//! reference inside the notebook (page, interwiki). The patterns below are all
//! anchored at the start of the link.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::cursor::MatchCursor;
use crate::percent::{EncodeMode, percent_decode, percent_encode};

/// Character class for URL bodies in running text.
const URL_CHAR: &str = r#"[^\s"<>']"#;

/// URL and email pattern for running text; `{c}` stands for [`URL_CHAR`].
const URL_PATTERN: &str = r"(?x)(
    \b \w[\w+\-.]+:// {c}* \[ {c}+ \] (?: {c}+ [\w/] )?  |
    \b \w[\w+\-.]+:// {c}+ [\w/]                          |
    \b mailto: {c}+ @ {c}* \[ {c}+ \] (?: {c}+ [\w/] )?   |
    \b mailto: {c}+ @ {c}+ [\w/]                          |
    \b {c}+ @ {c}+ \. \w+ \b
)";

/// Pattern finding URLs and email addresses in running text.
///
/// Stricter than the anchored link patterns: `scheme://` URLs must end in a
/// word char or `/`, the host may be an IPv6 `[...]` literal, and bare email
/// addresses need a dotted domain.
pub fn url_pattern() -> String {
    URL_PATTERN.replace("{c}", URL_CHAR)
}

/// A fresh cursor over [`url_pattern`], ready for
/// [`MatchCursor::substitute_list`].
pub fn url_cursor() -> MatchCursor {
    MatchCursor::new(&url_pattern()).expect("Invalid URL regex")
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid link regex"))
}

/// `scheme:`
fn uri_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^(\w[\w+\-.]*):")
}

/// `scheme://`
fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^(\w[\w+\-.]*)://")
}

/// `www.` followed by two or more domain sections
fn www_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^www\.([\w\-]+\.)+[\w\-]+")
}

/// `mailto:` address or `name@host`, but not `mid:`/`cid:` URIs
fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^(mailto:\S+|[^\s:]+)@\S+\.\w+(\?.+)?$")
}

/// `/`, `./`, `../`, `~/`, `~user/` (or with `\`), and `X:\`
fn path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^(/|\.\.?[/\\]|~.*[/\\]|[A-Za-z]:\\)")
}

/// `X:\` or `X:/`
fn win32_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^[A-Za-z]:[\\/]")
}

/// `\\host\share` or `smb://`
fn win32_share_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^(\\\\[^\\]+\\.+|smb://)")
}

/// `key?path`
fn interwiki_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^(\w[\w+\-.]*)\?(.*)")
}

fn interwiki_keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"^\w[\w+\-.]*$")
}

fn interwiki_key_invalid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"[^\w+\-.]")
}

/// What a link points at. Computed from the link text by [`link_type`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkType {
    /// Local file, `file:` URI or filesystem path.
    File,
    /// URL with any other scheme, e.g. `http`, `https`, `ftp`.
    Scheme(String),
    Mailto,
    /// Email message URI (RFC 2392).
    Mid,
    /// Email content part URI (RFC 2392).
    Cid,
    /// Windows share, `\\host\share` or `smb://`.
    Smb,
    /// `key?page` link into another wiki.
    Interwiki,
    /// `zim+` URL pointing into another notebook.
    Notebook,
    /// Page in this notebook.
    Page,
}

impl LinkType {
    fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "file" => LinkType::File,
            "mailto" => LinkType::Mailto,
            "mid" => LinkType::Mid,
            "cid" => LinkType::Cid,
            "smb" => LinkType::Smb,
            other => LinkType::Scheme(other.to_string()),
        }
    }

    /// The tag text, e.g. `"http"`, `"file"` or `"page"`.
    pub fn as_str(&self) -> &str {
        match self {
            LinkType::File => "file",
            LinkType::Scheme(scheme) => scheme,
            LinkType::Mailto => "mailto",
            LinkType::Mid => "mid",
            LinkType::Cid => "cid",
            LinkType::Smb => "smb",
            LinkType::Interwiki => "interwiki",
            LinkType::Notebook => "notebook",
            LinkType::Page => "page",
        }
    }

    /// True for links leaving the notebook.
    pub fn is_external(&self) -> bool {
        !matches!(
            self,
            LinkType::Page | LinkType::Interwiki | LinkType::Notebook
        )
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheme of a URI, URL or email address, or `None` for anything else.
///
/// Email addresses report `mailto` even without the `mailto:` prefix. Note
/// that page names containing `:` also look like URIs here; use
/// [`link_type`] when that matters.
pub fn uri_scheme(link: &str) -> Option<&str> {
    if email_regex().is_match(link) {
        return Some("mailto");
    }
    uri_regex()
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|scheme| scheme.as_str())
}

/// Classifies a link as found in wiki text.
///
/// Stricter than [`uri_scheme`]: a URI only counts when it has `//` (or is a
/// `file:/`, email, `www.`, `mid:` or `cid:` link), since page links may
/// contain `:` as well. Anything unrecognised is a [`LinkType::Page`].
pub fn link_type(link: &str) -> LinkType {
    if let Some(caps) = url_regex().captures(link) {
        if link.starts_with("zim+") {
            LinkType::Notebook
        } else {
            LinkType::from_scheme(&caps[1])
        }
    } else if link.starts_with("file:/") {
        LinkType::File
    } else if email_regex().is_match(link) {
        LinkType::Mailto
    } else if www_regex().is_match(link) {
        LinkType::Scheme("http".to_string())
    } else if link.contains('@') && link.starts_with("mid:") {
        LinkType::Mid
    } else if link.contains('@') && link.starts_with("cid:") {
        LinkType::Cid
    } else if win32_share_regex().is_match(link) {
        LinkType::Smb
    } else if path_regex().is_match(link) {
        LinkType::File
    } else if interwiki_regex().is_match(link) {
        LinkType::Interwiki
    } else {
        LinkType::Page
    }
}

/// True for `X:\...` and `X:/...` paths.
pub fn is_win32_path(path: &str) -> bool {
    win32_path_regex().is_match(path)
}

/// True if `name` can be used as is as an interwiki key.
pub fn is_interwiki_keyword(name: &str) -> bool {
    interwiki_keyword_regex().is_match(name)
}

/// Turns an arbitrary name into a usable interwiki key.
///
/// Characters other than word chars and `+-.` become `_`, and so does a
/// leading `-` or `.`.
pub fn valid_interwiki_key(name: &str) -> String {
    let key = interwiki_key_invalid_regex().replace_all(name, "_");
    if key.starts_with(['-', '.']) {
        format!("_{}", &key[1..])
    } else {
        key.into_owned()
    }
}

/// Which form [`normalize_share_path`] rewrites share paths into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareStyle {
    /// Whatever the build target uses.
    #[default]
    Native,
    /// `\\host\share\...`
    Windows,
    /// `smb://host/share/...`
    Posix,
}

impl ShareStyle {
    fn resolve(self) -> Self {
        match self {
            ShareStyle::Native if cfg!(windows) => ShareStyle::Windows,
            ShareStyle::Native => ShareStyle::Posix,
            other => other,
        }
    }
}

/// Rewrites a share path into the platform form.
///
/// See [`normalize_share_path`]; this uses [`ShareStyle::Native`].
pub fn normalize_win32_share(path: &str) -> String {
    normalize_share_path(path, ShareStyle::Native)
}

/// Rewrites share paths between `\\host\share` and `smb://host/share`.
///
/// With [`ShareStyle::Windows`] an `smb://` URL becomes a backslash path and
/// is percent-decoded. With [`ShareStyle::Posix`] a backslash path becomes an
/// `smb:` URL and is percent-encoded. Anything else is returned unchanged.
pub fn normalize_share_path(path: &str, style: ShareStyle) -> String {
    match style.resolve() {
        ShareStyle::Windows => match path.strip_prefix("smb:") {
            Some(rest) if rest.starts_with("//") => {
                percent_decode(&rest.replace('/', "\\"), EncodeMode::Path)
            }
            _ => path.to_string(),
        },
        _ => {
            if path.starts_with("\\\\") {
                format!(
                    "smb:{}",
                    percent_encode(&path.replace('\\', "/"), EncodeMode::Path)
                )
            } else {
                path.to_string()
            }
        }
    }
}
