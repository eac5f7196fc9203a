use shoal::lexer::{RedirectKind, TokenKind, TokenizerError, TokenizerFlags};
use widestring::utf32str;

use crate::tokens;

#[test]
fn words_and_pipe_tokenize_with_exact_offsets() {
    let stream = tokens(utf32str!("echo hi | cat"), TokenizerFlags::empty());

    assert_eq!(stream.len(), 5);

    assert_eq!(stream[0].kind, TokenKind::String);
    assert_eq!(stream[0].text.to_string(), "echo");
    assert_eq!((stream[0].offset(), stream[0].len()), (0, 4));

    assert_eq!(stream[1].kind, TokenKind::String);
    assert_eq!(stream[1].text.to_string(), "hi");
    assert_eq!((stream[1].offset(), stream[1].len()), (5, 2));

    assert_eq!(stream[2].kind, TokenKind::Pipe);
    assert_eq!(stream[2].text.to_string(), "1");
    assert_eq!((stream[2].offset(), stream[2].len()), (8, 1));

    assert_eq!(stream[3].kind, TokenKind::String);
    assert_eq!(stream[3].text.to_string(), "cat");
    assert_eq!((stream[3].offset(), stream[3].len()), (10, 3));

    assert_eq!(stream[4].kind, TokenKind::End);
    assert!(stream[4].text.is_empty());
    assert_eq!((stream[4].offset(), stream[4].len()), (13, 0));
}

#[test]
fn fd_redirection_consumes_prefix_and_leaves_target() {
    let stream = tokens(utf32str!("2>&1"), TokenizerFlags::empty());

    assert_eq!(stream.len(), 3);
    assert_eq!(stream[0].kind, TokenKind::Redirect(RedirectKind::Fd));
    assert_eq!(stream[0].text.to_string(), "2");
    assert_eq!((stream[0].offset(), stream[0].len()), (0, 3));

    assert_eq!(stream[1].kind, TokenKind::String);
    assert_eq!(stream[1].text.to_string(), "1");
    assert_eq!((stream[1].offset(), stream[1].len()), (3, 1));

    assert_eq!(stream[2].kind, TokenKind::End);
}

#[test]
fn unterminated_quote_is_strict_error_after_leading_word() {
    let stream = tokens(utf32str!("echo \"foo"), TokenizerFlags::empty());

    assert_eq!(stream.len(), 2);
    assert_eq!(stream[0].kind, TokenKind::String);
    assert_eq!(stream[0].text.to_string(), "echo");

    let error = &stream[1];
    assert_eq!(
        error.kind,
        TokenKind::Error(TokenizerError::UnterminatedQuote)
    );
    assert_eq!((error.offset(), error.len()), (5, 4));
    assert_eq!(error.error_offset.map(|o| o.as_usize()), Some(0));
    assert_eq!(
        error.text.to_string(),
        "Unexpected end of string, quotes are not balanced"
    );
}

#[test]
fn unterminated_quote_is_tolerated_when_accepting_unfinished_input() {
    let stream = tokens(utf32str!("echo \"foo"), TokenizerFlags::ACCEPT_UNFINISHED);

    assert_eq!(stream.len(), 3);
    assert_eq!(stream[0].text.to_string(), "echo");
    assert_eq!(stream[1].kind, TokenKind::String);
    assert_eq!(stream[1].text.to_string(), "\"foo");
    assert_eq!((stream[1].offset(), stream[1].len()), (5, 4));
    assert_eq!(stream[2].kind, TokenKind::End);
}

#[test]
fn escaped_newline_inside_a_word_stays_in_the_word() {
    let stream = tokens(utf32str!("a\\\nb"), TokenizerFlags::empty());

    assert_eq!(stream[0].kind, TokenKind::String);
    assert_eq!(stream[0].text.to_string(), "a\\\nb");
    assert_eq!((stream[0].offset(), stream[0].len()), (0, 4));
    assert_eq!(stream[1].kind, TokenKind::End);
}

#[test]
fn escaped_newline_between_words_is_whitespace() {
    let stream = tokens(utf32str!("a \\\nb"), TokenizerFlags::empty());

    assert_eq!(stream.len(), 3);
    assert_eq!(stream[0].text.to_string(), "a");
    assert_eq!(stream[1].kind, TokenKind::String);
    assert_eq!(stream[1].text.to_string(), "b");
    assert_eq!((stream[1].offset(), stream[1].len()), (4, 1));
}

#[test]
fn bare_pipe_carries_stdout_fd_text() {
    let stream = tokens(utf32str!("|foo"), TokenizerFlags::empty());

    assert_eq!(stream[0].kind, TokenKind::Pipe);
    assert_eq!(stream[0].text.to_string(), "1");
    assert_eq!((stream[0].offset(), stream[0].len()), (0, 1));

    assert_eq!(stream[1].kind, TokenKind::String);
    assert_eq!(stream[1].text.to_string(), "foo");
    assert_eq!((stream[1].offset(), stream[1].len()), (1, 3));
}

#[test]
fn piping_stdin_is_rejected() {
    let stream = tokens(utf32str!("0>|rest"), TokenizerFlags::empty());

    assert_eq!(stream.len(), 1);
    assert_eq!(stream[0].kind, TokenKind::Error(TokenizerError::InvalidPipe));
    assert_eq!((stream[0].offset(), stream[0].len()), (0, 0));
    assert_eq!(
        stream[0].text.to_string(),
        "Cannot use stdin (fd 0) as pipe output"
    );
}

#[test]
fn background_token_carries_no_text() {
    let stream = tokens(utf32str!("sleep 5 &"), TokenizerFlags::empty());

    assert_eq!(stream[2].kind, TokenKind::Background);
    assert!(stream[2].text.is_empty());
    assert_eq!((stream[2].offset(), stream[2].len()), (8, 1));
}

#[test]
fn end_of_input_token_is_empty_and_final() {
    let mut tokenizer = shoal::lexer::Tokenizer::new(utf32str!("a"), TokenizerFlags::empty());

    let word = tokenizer.next().expect("word token");
    assert_eq!(word.kind, TokenKind::String);

    let end = tokenizer.next().expect("end token");
    assert_eq!(end.kind, TokenKind::End);
    assert!(end.text.is_empty());
    assert_eq!((end.offset(), end.len()), (1, 0));

    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn tok_first_extracts_the_leading_command_word() {
    assert_eq!(
        shoal::lexer::tok_first(utf32str!("echo hi | cat")).to_string(),
        "echo"
    );
    assert_eq!(shoal::lexer::tok_first(utf32str!("   ")).to_string(), "");
    assert_eq!(shoal::lexer::tok_first(utf32str!("| cat")).to_string(), "");
    assert_eq!(shoal::lexer::tok_first(utf32str!("2> out")).to_string(), "");
}
