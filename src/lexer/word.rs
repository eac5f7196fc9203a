//! Bareword scanning with subshell and subscript tracking.

use widestring::Utf32Str;

use crate::lexer::classify::{is_ascii_letter, is_string_character};
use crate::lexer::cursor::Cursor;
use crate::lexer::diagnostics::TokenizerError;
use crate::lexer::quote::quote_end;
use crate::lexer::span::Span;

/// Open parens recorded for diagnostics before the scanner gives up on
/// precise error positions. Parens beyond this bound are still counted.
pub(crate) const MAX_RECORDED_PARENS: usize = 96;

/// Scanner mode for one bareword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordMode {
    /// Regular text.
    Regular,
    /// Inside subshell parentheses.
    Subshell,
    /// Inside an array subscript.
    Brackets,
    /// Inside a subshell nested in an array subscript, as in `$foo[(ech`.
    BracketsAndSubshell,
}

/// A bareword scan failure with its source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WordScanError {
    pub(crate) kind: TokenizerError,
    /// Source offset of the defect: the escape or quote character, the
    /// innermost recorded paren, or the opening bracket.
    pub(crate) error_at: usize,
}

/// Returns the offset of the next NUL at or after `from`, or input end.
fn nul_or_end(input: &Utf32Str, from: usize) -> usize {
    let chars = input.as_char_slice();
    match chars[from.min(chars.len())..].iter().position(|&c| c == '\0') {
        Some(found) => from + found,
        None => chars.len(),
    }
}

/// Consumes one bareword starting at the cursor.
///
/// On success the cursor rests on the first code point past the word and the
/// returned span covers the word. On error the cursor stays wherever the
/// scan stopped, so the driver can report the full scanned extent.
pub(crate) fn scan_word(
    cursor: &mut Cursor,
    input: &Utf32Str,
    accept_unfinished: bool,
) -> Result<Span, WordScanError> {
    let start = cursor.offset();
    let mut mode = WordMode::Regular;
    let mut paren_count = 0usize;
    // Innermost recorded paren is always `last()`; truncated on every close
    // so the record survives interleaved opens and closes.
    let mut paren_offsets: Vec<usize> = Vec::new();
    let mut bracket_offset = 0usize;
    let mut is_first = true;
    let mut keep_scanning = true;

    loop {
        let c = cursor.peek(input).unwrap_or('\0');
        if !is_ascii_letter(c) {
            if c == '\\' {
                let escape_offset = cursor.offset();
                cursor.advance(input);
                if matches!(cursor.peek(input), None | Some('\0')) {
                    if !accept_unfinished {
                        return Err(WordScanError {
                            kind: TokenizerError::UnterminatedEscape,
                            error_at: escape_offset,
                        });
                    }
                    // The token keeps the trailing backslash; step back so
                    // the closing advance cannot overshoot the input.
                    cursor.retreat();
                    keep_scanning = false;
                }
                cursor.advance(input);
                continue;
            }

            match mode {
                WordMode::Regular => match c {
                    '(' => {
                        paren_count = 1;
                        paren_offsets.clear();
                        paren_offsets.push(cursor.offset());
                        mode = WordMode::Subshell;
                    }
                    '[' => {
                        // A bracket at token start is ordinary text, so
                        // barewords like `[` tokenize normally.
                        if cursor.offset() != start {
                            bracket_offset = cursor.offset();
                            mode = WordMode::Brackets;
                        }
                    }
                    '\'' | '"' => match quote_end(input, cursor.offset()) {
                        Some(end) => {
                            let distance = end - cursor.offset();
                            cursor.advance_by(distance, input);
                        }
                        None => {
                            let quote_offset = cursor.offset();
                            let distance = nul_or_end(input, quote_offset) - quote_offset;
                            cursor.advance_by(distance, input);
                            if !accept_unfinished {
                                return Err(WordScanError {
                                    kind: TokenizerError::UnterminatedQuote,
                                    error_at: quote_offset,
                                });
                            }
                            keep_scanning = false;
                        }
                    },
                    _ => {
                        if !is_string_character(c, is_first) {
                            keep_scanning = false;
                        }
                    }
                },

                WordMode::Subshell | WordMode::BracketsAndSubshell => match c {
                    '\'' | '"' => match quote_end(input, cursor.offset()) {
                        Some(end) => {
                            let distance = end - cursor.offset();
                            cursor.advance_by(distance, input);
                        }
                        None => {
                            let quote_offset = cursor.offset();
                            let distance = nul_or_end(input, quote_offset) - quote_offset;
                            cursor.advance_by(distance, input);
                            if !accept_unfinished {
                                return Err(WordScanError {
                                    kind: TokenizerError::UnterminatedQuote,
                                    error_at: quote_offset,
                                });
                            }
                            keep_scanning = false;
                        }
                    },
                    '(' => {
                        paren_offsets.truncate(paren_count.min(MAX_RECORDED_PARENS));
                        if paren_count < MAX_RECORDED_PARENS {
                            paren_offsets.push(cursor.offset());
                        }
                        paren_count += 1;
                    }
                    ')' => {
                        paren_count -= 1;
                        paren_offsets.truncate(paren_count.min(MAX_RECORDED_PARENS));
                        if paren_count == 0 {
                            mode = if mode == WordMode::BracketsAndSubshell {
                                WordMode::Brackets
                            } else {
                                WordMode::Regular
                            };
                        }
                    }
                    '\0' => keep_scanning = false,
                    _ => {}
                },

                WordMode::Brackets => match c {
                    '(' => {
                        paren_count = 1;
                        paren_offsets.clear();
                        paren_offsets.push(cursor.offset());
                        mode = WordMode::BracketsAndSubshell;
                    }
                    ']' => mode = WordMode::Regular,
                    '\0' => keep_scanning = false,
                    _ => {}
                },
            }
        }

        if !keep_scanning {
            break;
        }
        cursor.advance(input);
        is_first = false;
    }

    if !accept_unfinished && mode != WordMode::Regular {
        return Err(match mode {
            WordMode::Subshell => {
                // Position the error at the innermost recorded open paren,
                // or at the source start when the record overflowed.
                let error_at = if paren_count <= MAX_RECORDED_PARENS {
                    paren_offsets.last().copied().unwrap_or(0)
                } else {
                    0
                };
                WordScanError {
                    kind: TokenizerError::UnterminatedSubshell,
                    error_at,
                }
            }
            _ => WordScanError {
                kind: TokenizerError::UnterminatedSlice,
                error_at: bracket_offset,
            },
        });
    }

    Ok(Span::from_usize(start, cursor.offset()))
}
