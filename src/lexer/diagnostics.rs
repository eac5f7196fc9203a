//! Tokenizer error categories and their canonical messages.

/// Lexical error categories.
///
/// Errors are delivered as tokens, not as a side channel: the driver emits a
/// single error token and then ends the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizerError {
    /// A quoted span was still open at end of input.
    UnterminatedQuote,
    /// A subshell was still open at end of input.
    UnterminatedSubshell,
    /// An array subscript was still open at end of input.
    UnterminatedSlice,
    /// A backslash had no code point to escape.
    UnterminatedEscape,
    /// A redirection prefix could not be parsed.
    InvalidRedirect,
    /// A pipe tried to redirect stdin.
    InvalidPipe,
}

impl TokenizerError {
    /// Returns the canonical human-readable message for this error.
    ///
    /// Embedders that localize substitute their own text; squash-errors mode
    /// suppresses the message entirely.
    pub fn message(self) -> &'static str {
        match self {
            TokenizerError::UnterminatedQuote => {
                "Unexpected end of string, quotes are not balanced"
            }
            TokenizerError::UnterminatedSubshell => {
                "Unexpected end of string, parenthesis do not match"
            }
            TokenizerError::UnterminatedSlice => {
                "Unexpected end of string, square brackets do not match"
            }
            TokenizerError::UnterminatedEscape => {
                "Unexpected end of string, incomplete escape sequence"
            }
            TokenizerError::InvalidRedirect => "Invalid input/output redirection",
            TokenizerError::InvalidPipe => "Cannot use stdin (fd 0) as pipe output",
        }
    }
}
