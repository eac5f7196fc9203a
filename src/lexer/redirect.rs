//! Redirection and fd-pipe prefix scanning.

use libc::{c_int, STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use widestring::{utf32str, Utf32Str};

use crate::lexer::token::RedirectKind;

/// What a redirection-looking prefix turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeOrRedirect {
    /// An fd pipe such as `2>|`; the driver emits a pipe token.
    Pipe,
    /// A true redirection.
    Redirect(RedirectKind),
}

/// Result of scanning one redirection or fd-pipe prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectScan {
    /// Pipe or redirection category.
    pub kind: PipeOrRedirect,
    /// The redirected fd, or `-1` when the digit prefix overflowed.
    pub fd: i32,
    /// Code points consumed from the input.
    pub consumed: usize,
}

/// Returns the code point at `index`, with NUL standing in for input end.
fn char_at(input: &Utf32Str, index: usize) -> char {
    input.as_char_slice().get(index).copied().unwrap_or('\0')
}

/// Scans a redirection or fd-pipe prefix such as `>`, `2>>`, `<&`, or `2>|`.
///
/// The fd may be written as a leading digit run or inferred from the sigil
/// (`>` is stdout, `<` is stdin, `^` is stderr). An overflowing digit run is
/// consumed in full and saturates the fd to `-1`. A caret may not follow an
/// explicit fd prefix. Returns `None` when the input is not a redirection;
/// the caller then treats it as a string.
pub fn scan_redirection_or_pipe(input: &Utf32Str) -> Option<RedirectScan> {
    let mut index = 0usize;

    // Parse out a leading fd. Consume every digit even on overflow, so a
    // rejected fd cannot be re-lexed as a valid one.
    let mut big_fd: i64 = 0;
    while char_at(input, index).is_ascii_digit() {
        if big_fd <= i64::from(i32::MAX) {
            let digit = char_at(input, index) as i64 - '0' as i64;
            big_fd = big_fd * 10 + digit;
        }
        index += 1;
    }

    let mut fd = if big_fd > i64::from(i32::MAX) {
        -1
    } else {
        big_fd as i32
    };

    if index == 0 {
        // No explicit fd, so infer it from the sigil.
        fd = match char_at(input, index) {
            '>' => STDOUT_FILENO,
            '<' => STDIN_FILENO,
            '^' => STDERR_FILENO,
            _ => return None,
        };
    }

    // Either way the cursor now rests on the redirection sigil itself. A
    // caret with an explicit fd prefix is rejected.
    let sigil = char_at(input, index);
    index += 1;
    let mut kind = if sigil == '>' || (sigil == '^' && index == 1) {
        if char_at(input, index) == sigil {
            // Doubled up like `>>` or `^^` means append.
            index += 1;
            PipeOrRedirect::Redirect(RedirectKind::Append)
        } else {
            PipeOrRedirect::Redirect(RedirectKind::Out)
        }
    } else if sigil == '<' {
        PipeOrRedirect::Redirect(RedirectKind::In)
    } else {
        return None;
    };

    // Optional suffix: `&` rebinds an fd, `?` refuses to clobber, and `|`
    // turns the whole prefix into a pipe for the driver to reinterpret.
    match char_at(input, index) {
        '&' => {
            kind = PipeOrRedirect::Redirect(RedirectKind::Fd);
            index += 1;
        }
        '?' => {
            kind = PipeOrRedirect::Redirect(RedirectKind::NoClobber);
            index += 1;
        }
        '|' => {
            kind = PipeOrRedirect::Pipe;
            index += 1;
        }
        _ => {}
    }

    Some(RedirectScan {
        kind,
        fd,
        consumed: index,
    })
}

/// Interprets token text as a redirection, excluding pipes.
///
/// Returns the redirection kind and the resolved fd, or `None` when the text
/// is not a redirection, is an fd pipe, or carries an overflowed fd.
pub fn redirection_type(text: &Utf32Str) -> Option<(RedirectKind, i32)> {
    match scan_redirection_or_pipe(text)? {
        RedirectScan {
            kind: PipeOrRedirect::Redirect(kind),
            fd,
            ..
        } if fd >= 0 => Some((kind, fd)),
        _ => None,
    }
}

/// Returns the fd being piped by the given token text, or `None` when the
/// text is not a pipe.
pub fn fd_redirected_by_pipe(text: &Utf32Str) -> Option<i32> {
    // Fast path for the common case.
    if text == utf32str!("|") {
        return Some(STDOUT_FILENO);
    }

    match scan_redirection_or_pipe(text)? {
        RedirectScan {
            kind: PipeOrRedirect::Pipe,
            fd,
            ..
        } if fd >= 0 => Some(fd),
        _ => None,
    }
}

/// Maps a redirection kind to `open(2)` flags.
///
/// Fd rebindings do not open files, so `Fd` maps to `None`.
pub fn open_flags(kind: RedirectKind) -> Option<c_int> {
    match kind {
        RedirectKind::Append => Some(libc::O_CREAT | libc::O_APPEND | libc::O_WRONLY),
        RedirectKind::Out => Some(libc::O_CREAT | libc::O_WRONLY | libc::O_TRUNC),
        RedirectKind::NoClobber => Some(libc::O_CREAT | libc::O_EXCL | libc::O_WRONLY),
        RedirectKind::In => Some(libc::O_RDONLY),
        RedirectKind::Fd => None,
    }
}
