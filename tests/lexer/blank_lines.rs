use shoal::lexer::{TokenKind, TokenizerFlags};
use widestring::utf32str;

use crate::tokens;

#[test]
fn terminator_runs_compress_by_default() {
    let stream = tokens(utf32str!("a\n\n\nb"), TokenizerFlags::empty());

    assert_eq!(stream.len(), 4);
    assert_eq!(stream[0].text.to_string(), "a");

    assert_eq!(stream[1].kind, TokenKind::End);
    assert_eq!(stream[1].text.to_string(), "\n");
    assert_eq!((stream[1].offset(), stream[1].len()), (1, 1));

    assert_eq!(stream[2].kind, TokenKind::String);
    assert_eq!(stream[2].text.to_string(), "b");
    assert_eq!((stream[2].offset(), stream[2].len()), (4, 1));

    assert_eq!(stream[3].kind, TokenKind::End);
}

#[test]
fn blank_lines_are_preserved_on_request() {
    let stream = tokens(utf32str!("a\n\n\nb"), TokenizerFlags::SHOW_BLANK_LINES);

    let kinds: Vec<_> = stream.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::String,
            TokenKind::End,
            TokenKind::End,
            TokenKind::End,
            TokenKind::String,
            TokenKind::End,
        ]
    );
    assert_eq!((stream[1].offset(), stream[2].offset(), stream[3].offset()), (1, 2, 3));
}

#[test]
fn semicolon_terminates_like_a_newline() {
    let stream = tokens(utf32str!("a;b"), TokenizerFlags::empty());

    assert_eq!(stream[1].kind, TokenKind::End);
    assert_eq!(stream[1].text.to_string(), ";");
    assert_eq!((stream[1].offset(), stream[1].len()), (1, 1));
    assert_eq!(stream[2].text.to_string(), "b");
}

#[test]
fn compression_also_swallows_trailing_blanks() {
    let stream = tokens(utf32str!("a; \t\nb"), TokenizerFlags::empty());

    assert_eq!(stream.len(), 4);
    assert_eq!(stream[1].kind, TokenKind::End);
    assert_eq!(stream[1].text.to_string(), ";");
    assert_eq!(stream[2].text.to_string(), "b");
    assert_eq!(stream[2].offset(), 5);
}

#[test]
fn carriage_return_is_whitespace_before_a_newline() {
    let stream = tokens(utf32str!("a\r\nb"), TokenizerFlags::SHOW_BLANK_LINES);

    // The pre-token phase eats the bare carriage return, so the end token is
    // the newline itself.
    assert_eq!(stream[1].kind, TokenKind::End);
    assert_eq!(stream[1].text.to_string(), "\n");
    assert_eq!((stream[1].offset(), stream[1].len()), (2, 1));
}

#[test]
fn end_token_length_is_the_single_terminator() {
    let stream = tokens(utf32str!("a;\n\n b"), TokenizerFlags::empty());

    assert_eq!(stream[1].kind, TokenKind::End);
    assert_eq!((stream[1].offset(), stream[1].len()), (1, 1));
    assert_eq!(stream[2].offset(), 5);
}
