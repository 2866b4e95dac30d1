//! # Expression Lexer
//!
//! Tokenizes sizing formulas such as `0.05*F1 + 0.001`.
//!
//! ## Example
//!
//! ```rust
//! use sizing_expr::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("0.05*F1").tokenize().unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Number);
//! assert_eq!(tokens[2].kind, TokenKind::Identifier);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::error::{ExprError, ExprResult};
use crate::span::Span;

// =============================================================================
// LEXER
// =============================================================================

/// Expression lexer.
///
/// Converts source text into a stream of tokens terminated by
/// [`TokenKind::Eof`].
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens including the EOF token, or the first lexical error.
    pub fn tokenize(mut self) -> ExprResult<Vec<Token>> {
        loop {
            self.cursor.eat_while(char::is_whitespace);
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token()?;
        }

        let end = self.cursor.offset();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::at(end), String::new()));
        Ok(self.tokens)
    }

    /// Scan a single token.
    fn scan_token(&mut self) -> ExprResult<()> {
        let start = self.cursor.offset();
        let c = match self.cursor.peek() {
            Some(c) => c,
            None => return Ok(()),
        };

        if c.is_ascii_digit() || (c == '.' && self.cursor.peek_next().is_some_and(|n| n.is_ascii_digit())) {
            self.scan_number(start);
            return Ok(());
        }
        if c.is_ascii_alphabetic() || c == '_' {
            self.scan_identifier(start);
            return Ok(());
        }

        self.cursor.advance();
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            other => {
                return Err(ExprError::UnexpectedCharacter {
                    ch: other,
                    span: Span::new(start, self.cursor.offset()),
                })
            }
        };
        self.push(kind, start);
        Ok(())
    }

    /// Scan a number literal: digits, optional fraction, optional exponent.
    fn scan_number(&mut self, start: usize) {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.peek() == Some('.') {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        // Only take the exponent when digits follow, so `2e` stays `2` `e`.
        if matches!(self.cursor.peek(), Some('e') | Some('E')) {
            let digit_follows = match self.cursor.peek_next() {
                Some(d) if d.is_ascii_digit() => true,
                Some('+') | Some('-') => self.exponent_sign_has_digit(),
                _ => false,
            };
            if digit_follows {
                self.cursor.advance();
                if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                    self.cursor.advance();
                }
                self.cursor.eat_while(|c| c.is_ascii_digit());
            }
        }

        self.push(TokenKind::Number, start);
    }

    /// Check for `e+5` / `e-5` without consuming anything.
    fn exponent_sign_has_digit(&self) -> bool {
        let mut probe = Cursor::new(self.cursor.rest());
        probe.advance(); // e
        probe.advance(); // sign
        probe.peek().is_some_and(|c| c.is_ascii_digit())
    }

    /// Scan an identifier.
    fn scan_identifier(&mut self, start: usize) {
        self.cursor
            .eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        self.push(TokenKind::Identifier, start);
    }

    /// Push a token covering `start..offset`.
    fn push(&mut self, kind: TokenKind, start: usize) {
        let text = self.cursor.slice_from(start).to_string();
        let span = Span::new(start, self.cursor.offset());
        self.tokens.push(Token::new(kind, span, text));
    }
}

// =============================================================================
// TESTS
// =============================================================================
