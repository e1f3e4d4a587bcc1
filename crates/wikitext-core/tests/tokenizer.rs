//! Layered tokenizing: each pass turns one kind of span into tokens and
//! leaves the rest of the text alone.

use insta::assert_debug_snapshot;
use pretty_assertions::assert_eq;
use wikitext_core::{Fragment, LinkType, MatchCursor, link_type, url_cursor};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Link { target: String, kind: LinkType },
    Tag(String),
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn link_token(cursor: &MatchCursor) -> Token {
    let target = cursor.group(0).unwrap_or_default().to_string();
    let kind = link_type(&target);
    Token::Link { target, kind }
}

fn tag_token(cursor: &MatchCursor) -> Token {
    Token::Tag(cursor.group(1).unwrap_or_default().to_string())
}

#[test]
fn two_passes_tokenize_only_matched_spans() {
    init_logging();
    let mut urls = url_cursor();
    let mut tags = MatchCursor::new(r"@(\w+)").unwrap();

    let items = vec![Fragment::text("plain a@b.com text")];
    let items = urls.substitute_list(link_token, items);
    let items = tags.substitute_list(tag_token, items);

    assert_debug_snapshot!(items, @r#"
    [
        Text(
            "plain ",
        ),
        Token(
            Link {
                target: "a@b.com",
                kind: Mailto,
            },
        ),
        Text(
            " text",
        ),
    ]
    "#);
}

#[test]
fn later_passes_do_not_touch_earlier_tokens() {
    init_logging();
    let mut urls = url_cursor();
    let mut tags = MatchCursor::new(r"@(\w+)").unwrap();

    let items = vec![
        Fragment::text("see https://example.com/a for @todo"),
        Fragment::text("and @later"),
    ];
    let items = urls.substitute_list(link_token, items);
    let items = tags.substitute_list(tag_token, items);

    assert_eq!(
        items,
        vec![
            Fragment::text("see "),
            Fragment::Token(Token::Link {
                target: "https://example.com/a".to_string(),
                kind: LinkType::Scheme("https".to_string()),
            }),
            Fragment::text(" for "),
            Fragment::Token(Token::Tag("todo".to_string())),
            Fragment::text("and "),
            Fragment::Token(Token::Tag("later".to_string())),
        ]
    );
}

#[test]
fn no_empty_fragments_between_adjacent_tokens() {
    let mut tags = MatchCursor::new(r"@(\w+)").unwrap();
    let items = tags.substitute_list(tag_token, vec![Fragment::text("@a@b @c")]);
    assert!(items.iter().all(|item| item.as_text() != Some("")));
    assert_eq!(
        items,
        vec![
            Fragment::Token(Token::Tag("a".to_string())),
            Fragment::Token(Token::Tag("b".to_string())),
            Fragment::text(" "),
            Fragment::Token(Token::Tag("c".to_string())),
        ]
    );
}

#[test]
fn one_cursor_per_thread() {
    let handles: Vec<_> = ["x @one", "y @two"]
        .into_iter()
        .map(|text| {
            std::thread::spawn(move || {
                let mut tags = MatchCursor::new(r"@(\w+)").unwrap();
                tags.substitute_list(tag_token, vec![Fragment::text(text)])
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0][1], Fragment::Token(Token::Tag("one".to_string())));
    assert_eq!(results[1][1], Fragment::Token(Token::Tag("two".to_string())));
}
