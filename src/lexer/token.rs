//! Token contracts for the tokenizer.

use widestring::Utf32String;

use crate::lexer::diagnostics::TokenizerError;
use crate::lexer::span::{Span, TokenOffset};

/// Redirection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectKind {
    /// `>`: create, write-only, truncate.
    Out,
    /// `>>` or `^^`: create, write-only, append.
    Append,
    /// `<`: read-only.
    In,
    /// `>&`: rebind to another file descriptor.
    Fd,
    /// `>?`: create, write-only, fail if the file exists.
    NoClobber,
}

/// Token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A bareword, possibly containing quotes, subshells, and subscripts.
    String,
    /// A pipe; the token text names the fd being piped.
    Pipe,
    /// A statement terminator: newline, `;`, or end of input.
    End,
    /// A redirection; the token text names the resolved fd.
    Redirect(RedirectKind),
    /// `&`: send the job to the background.
    Background,
    /// A `#` comment, without its trailing newline.
    Comment,
    /// A lexical error; the stream ends after this token.
    Error(TokenizerError),
}

/// A lexical token with owned text and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Token text. This is the exact source slice for strings and comments,
    /// and synthesized text for pipes, redirections, and error messages.
    pub text: Utf32String,
    /// Source range covered by the token.
    pub span: Span,
    /// For error tokens, where within the token the defect was detected.
    pub error_offset: Option<TokenOffset>,
}

impl Token {
    /// Creates a token value.
    pub fn new(kind: TokenKind, text: Utf32String, span: Span) -> Self {
        Self {
            kind,
            text,
            span,
            error_offset: None,
        }
    }

    /// Returns the token start relative to the source start, in code points.
    pub fn offset(&self) -> usize {
        self.span.start.as_usize()
    }

    /// Returns the source extent of the token in code points.
    ///
    /// For error tokens this covers the scanned source range, which can
    /// differ from the length of the synthesized message text.
    pub fn len(&self) -> usize {
        self.span.len() as usize
    }

    /// Returns `true` when the token covers no source code points.
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}
