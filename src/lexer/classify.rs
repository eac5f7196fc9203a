//! Character classification predicates shared by the scanner and the
//! word-motion automata.

/// Tests if a character can be part of a string token.
///
/// `^` is a redirection sigil only at token start, so it separates only when
/// `is_first`. `#` is handled by the driver before string scanning and is an
/// ordinary string character here.
pub fn is_string_character(c: char, is_first: bool) -> bool {
    match c {
        // Unconditional separators.
        '\0' | ' ' | '\n' | '|' | '\t' | ';' | '\r' | '<' | '>' | '&' => false,
        // Conditional separator.
        '^' => !is_first,
        _ => true,
    }
}

/// Tests if a character is whitespace, treating newline as a token.
pub fn is_whitespace_not_newline(c: char) -> bool {
    match c {
        ' ' | '\t' | '\r' => true,
        '\n' => false,
        _ => c.is_whitespace(),
    }
}

/// Tests if a character can be part of a path component.
///
/// The token-start rule applies here, so a caret is excluded along with the
/// listed punctuation.
pub fn is_path_component_character(c: char) -> bool {
    is_string_character(c, true) && !"/={,}'\"".contains(c)
}

/// Tests for blank characters (space or tab).
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Tests for printable, non-blank characters.
pub fn is_graphic(c: char) -> bool {
    !c.is_whitespace() && !c.is_control()
}

/// Fast path for the most common non-magical characters. Not a substitute
/// for full classification; callers fall through to the slow path on `false`.
pub(crate) fn is_ascii_letter(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_uppercase()
}
