//! Word-motion state machines for cursor movement.
//!
//! Each style is a small forward-only automaton: feed it code points in
//! motion order and it reports whether each one still belongs to the current
//! word. Once an automaton stops consuming it stays stopped until reset.

use crate::lexer::classify::{is_blank, is_graphic, is_path_component_character};

/// Word boundary styles for cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStyle {
    /// One character, then whitespace runs, then alphanumeric runs.
    Punctuation,
    /// Slash-aware motion that keeps path components together.
    PathComponents,
    /// One character, then blank runs, then printable runs.
    Whitespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PunctuationState {
    AlwaysOne,
    Whitespace,
    Alphanumeric,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathState {
    InitialPunctuation,
    Whitespace,
    Separator,
    Slash,
    PathCharacters,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WhitespaceState {
    AlwaysOne,
    Blank,
    Graph,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MotionState {
    Punctuation(PunctuationState),
    Path(PathState),
    Whitespace(WhitespaceState),
}

impl MotionState {
    fn initial(style: MotionStyle) -> Self {
        match style {
            MotionStyle::Punctuation => MotionState::Punctuation(PunctuationState::AlwaysOne),
            MotionStyle::PathComponents => MotionState::Path(PathState::InitialPunctuation),
            MotionStyle::Whitespace => MotionState::Whitespace(WhitespaceState::AlwaysOne),
        }
    }
}

/// A resettable word-motion automaton for one boundary style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMotion {
    style: MotionStyle,
    state: MotionState,
}

impl WordMotion {
    /// Creates an automaton in its initial state.
    pub fn new(style: MotionStyle) -> Self {
        Self {
            style,
            state: MotionState::initial(style),
        }
    }

    /// Returns the boundary style this automaton was built with.
    pub fn style(&self) -> MotionStyle {
        self.style
    }

    /// Feeds one code point; `true` means it extends the current word.
    pub fn consume(&mut self, c: char) -> bool {
        match &mut self.state {
            MotionState::Punctuation(state) => consume_punctuation(state, c),
            MotionState::Path(state) => consume_path_components(state, c),
            MotionState::Whitespace(state) => consume_whitespace(state, c),
        }
    }

    /// Returns the automaton to its initial state.
    pub fn reset(&mut self) {
        self.state = MotionState::initial(self.style);
    }
}

fn consume_punctuation(state: &mut PunctuationState, c: char) -> bool {
    let mut consumed = false;
    while *state != PunctuationState::End && !consumed {
        match *state {
            PunctuationState::AlwaysOne => {
                // Always consume the first character.
                consumed = true;
                *state = PunctuationState::Whitespace;
            }
            PunctuationState::Whitespace => {
                if c.is_whitespace() {
                    consumed = true;
                } else {
                    *state = PunctuationState::Alphanumeric;
                }
            }
            PunctuationState::Alphanumeric => {
                if c.is_alphanumeric() {
                    consumed = true;
                } else {
                    *state = PunctuationState::End;
                }
            }
            PunctuationState::End => {}
        }
    }
    consumed
}

fn consume_path_components(state: &mut PathState, c: char) -> bool {
    let mut consumed = false;
    while *state != PathState::End && !consumed {
        match *state {
            PathState::InitialPunctuation => {
                // Leading punctuation is consumed; a path character instead
                // moves straight on to whitespace handling.
                if !is_path_component_character(c) {
                    consumed = true;
                }
                *state = PathState::Whitespace;
            }
            PathState::Whitespace => {
                if c.is_whitespace() {
                    consumed = true;
                } else if c == '/' || is_path_component_character(c) {
                    *state = PathState::Slash;
                } else {
                    *state = PathState::Separator;
                }
            }
            PathState::Separator => {
                if !c.is_whitespace() && !is_path_component_character(c) {
                    consumed = true;
                } else {
                    *state = PathState::End;
                }
            }
            PathState::Slash => {
                if c == '/' {
                    consumed = true;
                } else {
                    *state = PathState::PathCharacters;
                }
            }
            PathState::PathCharacters => {
                if is_path_component_character(c) {
                    consumed = true;
                } else {
                    *state = PathState::End;
                }
            }
            PathState::End => {}
        }
    }
    consumed
}

fn consume_whitespace(state: &mut WhitespaceState, c: char) -> bool {
    let mut consumed = false;
    while *state != WhitespaceState::End && !consumed {
        match *state {
            WhitespaceState::AlwaysOne => {
                consumed = true;
                *state = WhitespaceState::Blank;
            }
            WhitespaceState::Blank => {
                if is_blank(c) {
                    consumed = true;
                } else {
                    *state = WhitespaceState::Graph;
                }
            }
            WhitespaceState::Graph => {
                if is_graphic(c) {
                    consumed = true;
                } else {
                    *state = WhitespaceState::End;
                }
            }
            WhitespaceState::End => {}
        }
    }
    consumed
}
