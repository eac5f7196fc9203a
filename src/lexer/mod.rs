//! Streaming tokenizer for the shoal language.
//!
//! The driver walks a single wide-character buffer and yields annotated
//! tokens with precise code-point offsets:
//! - skips whitespace and escaped-newline continuations between tokens
//! - emits or skips `#` comment runs depending on construction flags
//! - recognizes terminators, background markers, pipes, and redirections
//! - delegates barewords to the mode-tracking string scanner
//! - reports partially-formed input as error tokens, or tolerates it when
//!   unfinished input is accepted

pub mod classify;
pub mod diagnostics;
pub mod redirect;
pub mod span;
pub mod token;

mod cursor;
mod quote;
mod word;

use bitflags::bitflags;
use widestring::{Utf32Str, Utf32String};

use crate::lexer::classify::is_whitespace_not_newline;
use crate::lexer::cursor::Cursor;
use crate::lexer::word::scan_word;

pub use diagnostics::TokenizerError;
pub use redirect::{
    fd_redirected_by_pipe, open_flags, redirection_type, scan_redirection_or_pipe, PipeOrRedirect,
    RedirectScan,
};
pub use span::{SourceOffset, Span, TokenOffset};
pub use token::{RedirectKind, Token, TokenKind};

bitflags! {
    /// Construction flags for [`Tokenizer`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenizerFlags: u8 {
        /// Tolerate unterminated quotes, escapes, subshells, and subscripts,
        /// ending the affected token at end of input instead of erroring.
        const ACCEPT_UNFINISHED = 1 << 0;
        /// Emit comment tokens instead of skipping comment runs.
        const SHOW_COMMENTS = 1 << 1;
        /// Leave error-token text empty; the caller handles messages.
        const SQUASH_ERRORS = 1 << 2;
        /// Emit each terminator separately instead of compressing runs.
        const SHOW_BLANK_LINES = 1 << 3;
    }
}

/// Copies narrow text into an owned wide string.
fn widen(text: &str) -> Utf32String {
    let mut out = Utf32String::with_capacity(text.len());
    for c in text.chars() {
        out.push(c);
    }
    out
}

/// Streaming tokenizer over a borrowed wide-character buffer.
///
/// The tokenizer never mutates or copies the source; token text is copied
/// out per token. It is an [`Iterator`]: end of input yields one empty
/// [`TokenKind::End`] token and any error token ends the stream.
pub struct Tokenizer<'a> {
    input: &'a Utf32Str,
    cursor: Cursor,
    /// Cleared by end of input or an error token.
    has_next: bool,
    accept_unfinished: bool,
    show_comments: bool,
    squash_errors: bool,
    show_blank_lines: bool,
    /// Set by an escaped newline; makes the next comment run swallow its
    /// trailing newline too.
    continue_line_after_comment: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `input`.
    ///
    /// The caller keeps ownership of the buffer and must not mutate it while
    /// the tokenizer is alive; the borrow enforces this.
    pub fn new(input: &'a Utf32Str, flags: TokenizerFlags) -> Self {
        Self {
            input,
            cursor: Cursor::new(),
            has_next: true,
            accept_unfinished: flags.contains(TokenizerFlags::ACCEPT_UNFINISHED),
            show_comments: flags.contains(TokenizerFlags::SHOW_COMMENTS),
            squash_errors: flags.contains(TokenizerFlags::SQUASH_ERRORS),
            show_blank_lines: flags.contains(TokenizerFlags::SHOW_BLANK_LINES),
            continue_line_after_comment: false,
        }
    }

    /// Builds an error token and ends the stream.
    ///
    /// `error_at` is the source offset of the defect; it becomes a
    /// token-relative offset when it falls inside the scanned range.
    fn error_token(&mut self, error: TokenizerError, token_start: usize, error_at: usize) -> Token {
        self.has_next = false;
        let end = self.cursor.offset();
        let text = if self.squash_errors {
            Utf32String::new()
        } else {
            widen(error.message())
        };
        let mut token = Token::new(
            TokenKind::Error(error),
            text,
            Span::from_usize(token_start, end),
        );
        let within = if error_at >= token_start && error_at < end {
            error_at - token_start
        } else {
            0
        };
        token.error_offset = Some(TokenOffset::from_usize(within));
        token
    }

    /// Builds a pipe or redirection token from a completed prefix scan.
    fn redirect_token(&mut self, scan: RedirectScan, token_start: usize) -> Token {
        self.cursor.advance_by(scan.consumed, self.input);
        let kind = match scan.kind {
            PipeOrRedirect::Pipe => TokenKind::Pipe,
            PipeOrRedirect::Redirect(kind) => TokenKind::Redirect(kind),
        };
        Token::new(
            kind,
            widen(&scan.fd.to_string()),
            Span::from_usize(token_start, self.cursor.offset()),
        )
    }

    /// Scans a bareword token, or the error token it failed with.
    fn word_token(&mut self, token_start: usize) -> Token {
        let input = self.input;
        match scan_word(&mut self.cursor, input, self.accept_unfinished) {
            Ok(span) => Token::new(
                TokenKind::String,
                input[span.start.as_usize()..span.end.as_usize()].to_owned(),
                span,
            ),
            Err(error) => self.error_token(error.kind, token_start, error.error_at),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if !self.has_next {
            return None;
        }
        let input = self.input;

        // Consume non-newline whitespace. An escaped newline is consumed as
        // whitespace and arms the continue-line state for comment runs.
        loop {
            if self.cursor.peek(input) == Some('\\') && self.cursor.peek_at(input, 1) == Some('\n')
            {
                self.cursor.advance_by(2, input);
                self.continue_line_after_comment = true;
            } else if matches!(self.cursor.peek(input), Some(c) if is_whitespace_not_newline(c)) {
                self.cursor.advance(input);
            } else {
                break;
            }
        }

        while self.cursor.peek(input) == Some('#') {
            let comment_start = self.cursor.offset();
            while !matches!(self.cursor.peek(input), None | Some('\n') | Some('\0')) {
                self.cursor.advance(input);
            }
            let comment_end = self.cursor.offset();

            // When continuing the line, the comment swallows its newline.
            if self.cursor.peek(input) == Some('\n') && self.continue_line_after_comment {
                self.cursor.advance(input);
            }

            if self.show_comments {
                return Some(Token::new(
                    TokenKind::Comment,
                    input[comment_start..comment_end].to_owned(),
                    Span::from_usize(comment_start, comment_end),
                ));
            }

            while matches!(self.cursor.peek(input), Some(c) if is_whitespace_not_newline(c)) {
                self.cursor.advance(input);
            }
        }

        // Past the comments and any swallowed newlines.
        self.continue_line_after_comment = false;
        let token_start = self.cursor.offset();

        let token = match self.cursor.peek(input) {
            None | Some('\0') => {
                self.has_next = false;
                Token::new(
                    TokenKind::End,
                    Utf32String::new(),
                    Span::from_usize(token_start, token_start),
                )
            }
            Some(c @ ('\r' | '\n' | ';')) => {
                self.cursor.advance(input);
                let span = Span::from_usize(token_start, self.cursor.offset());
                // Swallow the rest of a terminator run so consecutive blank
                // lines compress into a single end token.
                if !self.show_blank_lines {
                    while matches!(self.cursor.peek(input), Some('\n' | '\r' | ' ' | '\t')) {
                        self.cursor.advance(input);
                    }
                }
                let mut text = Utf32String::new();
                text.push(c);
                Token::new(TokenKind::End, text, span)
            }
            Some('&') => {
                self.cursor.advance(input);
                Token::new(
                    TokenKind::Background,
                    Utf32String::new(),
                    Span::from_usize(token_start, self.cursor.offset()),
                )
            }
            Some('|') => {
                self.cursor.advance(input);
                Token::new(
                    TokenKind::Pipe,
                    widen("1"),
                    Span::from_usize(token_start, self.cursor.offset()),
                )
            }
            Some('>' | '<' | '^') => {
                // Never re-lex these as a string: a failed redirection here
                // is an error.
                let tail = &input[self.cursor.offset()..];
                match scan_redirection_or_pipe(tail) {
                    Some(scan) if scan.fd >= 0 => self.redirect_token(scan, token_start),
                    _ => self.error_token(TokenizerError::InvalidRedirect, token_start, token_start),
                }
            }
            Some(c) if c.is_ascii_digit() => {
                // Maybe a redirection like `2>&1`, maybe a pipe like `2>|`,
                // maybe just a string.
                let tail = &input[self.cursor.offset()..];
                match scan_redirection_or_pipe(tail) {
                    Some(scan) if scan.kind == PipeOrRedirect::Pipe && scan.fd == 0 => {
                        self.error_token(TokenizerError::InvalidPipe, token_start, token_start)
                    }
                    Some(scan) if scan.fd < 0 => {
                        self.error_token(TokenizerError::InvalidRedirect, token_start, token_start)
                    }
                    Some(scan) => self.redirect_token(scan, token_start),
                    None => self.word_token(token_start),
                }
            }
            Some(_) => self.word_token(token_start),
        };
        Some(token)
    }
}

/// Returns the text of the first string token in `input`, or empty text.
///
/// Useful for quick command-name extraction without a full parse.
pub fn tok_first(input: &Utf32Str) -> Utf32String {
    let mut tokenizer = Tokenizer::new(input, TokenizerFlags::SQUASH_ERRORS);
    match tokenizer.next() {
        Some(token) if token.kind == TokenKind::String => token.text,
        _ => Utf32String::new(),
    }
}
