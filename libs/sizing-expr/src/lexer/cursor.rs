//! # Character Cursor
//!
//! Peekable character cursor for the lexer, tracking the byte offset as it
//! advances.
//!
//! ## Example
//!
//! ```rust
//! use sizing_expr::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("F1");
//! assert_eq!(cursor.peek(), Some('F'));
//! cursor.advance();
//! assert_eq!(cursor.peek(), Some('1'));
//! ```

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with byte-offset tracking.
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current byte offset.
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor for source text.
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Check if at end of input.
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Peek at current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    /// Peek one character past the current one.
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.offset..].chars();
        chars.next();
        chars.next()
    }

    /// Consume and return the current character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Consume characters while `predicate` holds.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Unconsumed source text.
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Source slice between `start` and the current offset.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.offset]
    }
}

// =============================================================================
// TESTS
// =============================================================================
