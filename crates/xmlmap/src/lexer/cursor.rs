//! Scan cursor over the source text

use memchr::memchr;

/// Forward-only position in the source text
///
/// The cursor only ever stops on ASCII delimiters, so every offset it hands out
/// is a valid `str` boundary.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create cursor at the start of the input
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Get current position index
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Offset of the next `byte` at or after `from`
    pub fn find_from(&self, from: usize, byte: u8) -> Option<usize> {
        let rest = self.input.as_bytes().get(from..)?;
        memchr(byte, rest).map(|idx| from + idx)
    }

    /// Offset of the next `byte` at or after the cursor
    pub fn find(&self, byte: u8) -> Option<usize> {
        self.find_from(self.pos, byte)
    }

    /// Move the cursor forward; never moves it back
    pub fn advance_to(&mut self, pos: usize) {
        self.pos = self.pos.max(pos.min(self.input.len()));
    }

    /// Text between two offsets
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.input.get(start..end).unwrap_or_default()
    }

    pub const fn source(&self) -> &'a str {
        self.input
    }
}
