//! Source location primitives for the tokenizer.
//!
//! The source buffer is UTF-32, so offsets and lengths are counted in code
//! points and coincide with slice indices into the buffer.

/// Code-point offset from the start of the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceOffset(u32);

impl SourceOffset {
    /// Creates a source offset value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates an offset from `usize` with saturation.
    pub fn from_usize(value: usize) -> Self {
        match u32::try_from(value) {
            Ok(offset) => Self(offset),
            Err(_) => Self(u32::MAX),
        }
    }

    /// Returns the raw offset value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Converts the offset to `usize`.
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Code-point offset measured from the start of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenOffset(u32);

impl TokenOffset {
    /// Creates a token-relative offset value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates a token-relative offset from `usize` with saturation.
    pub fn from_usize(value: usize) -> Self {
        match u32::try_from(value) {
            Ok(offset) => Self(offset),
            Err(_) => Self(u32::MAX),
        }
    }

    /// Returns the raw offset value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Converts the offset to `usize`.
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Immutable half-open source range in code-point offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start offset.
    pub start: SourceOffset,
    /// Exclusive end offset.
    pub end: SourceOffset,
}

impl Span {
    /// Creates a span and normalizes offset ordering.
    pub fn new(start: SourceOffset, end: SourceOffset) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Creates a span from raw `usize` offsets.
    pub fn from_usize(start: usize, end: usize) -> Self {
        Self::new(SourceOffset::from_usize(start), SourceOffset::from_usize(end))
    }

    /// Returns the span length in code points.
    pub fn len(self) -> u32 {
        self.end.value() - self.start.value()
    }

    /// Returns `true` when the span covers no code points.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}
