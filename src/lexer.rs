//! Forward-only character cursor over the input string.
//!
//! The grammar needs only one character of lookahead, so no token stream is
//! materialized: the cursor classifies the next significant character and the
//! parser consumes characters directly. Reading past the end always yields
//! the end marker (`None`), never an out-of-bounds access, and the position
//! is monotonically non-decreasing.

use crate::Real;
use crate::error::SyntaxError;

/// A forward-only cursor over an expression string.
#[derive(Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset into the input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Peek at the current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advance the position by one character, saturating at the end.
    pub fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Skip whitespace.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Whether the cursor has consumed the entire input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consume the maximal run of digits and dots and parse it as a literal.
    ///
    /// At most one dot is allowed and the run must contain at least one
    /// digit, so `.5` and `5.` are fine while `.` and `1.2.3` are not. There
    /// is no exponent notation: `e` is a letter and lexes as an identifier.
    /// A literal too large for the numeric type is rejected rather than read
    /// as infinity.
    pub fn scan_number(&mut self) -> Result<Real, SyntaxError> {
        let start = self.pos;
        let mut dots = 0usize;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' {
                dots += 1;
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        if dots > 1 || !text.bytes().any(|b| b.is_ascii_digit()) {
            return Err(SyntaxError::InvalidNumber { position: start });
        }
        match text.parse::<Real>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(SyntaxError::InvalidNumber { position: start }),
        }
    }

    /// Consume the maximal run of ASCII letters and return it as a slice.
    ///
    /// Identifiers are whole-word: `exp` is one identifier, never `e`
    /// followed by `xp`.
    pub fn scan_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }
}
