//! Formula tokenizer
//!
//! A single left-to-right scan that turns formula text (without the leading
//! `=`) into typed tokens. The stream always ends with one
//! [`TokenKind::Formula`] token carrying an empty value.

use crate::error::{FormulaError, FormulaResult};
use lazy_regex::regex_find;
use log::{debug, trace};
use std::fmt;

/// One-character operators, including grouping and argument punctuation
const OPERATOR_CHARS: &str = "+-*/<>=&|:(),";

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TokenKind {
    /// Cell reference like `$A1`
    Ref,
    /// Operator or punctuation: `+ - * / < > = <> & | : ( ) ,`
    Operator,
    /// Function name
    Function,
    /// Numeric literal
    Number,
    /// Contents of a double-quoted string
    Characters,
    /// End-of-stream sentinel (empty value)
    Formula,
}

/// A typed piece of formula text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, value: S) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The end-of-stream sentinel
    pub fn eof() -> Self {
        Self::new(TokenKind::Formula, "")
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Formula && self.value.is_empty()
    }

    /// Check for an operator token with the given spelling
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "{:?} EOF", self.kind)
        } else {
            write!(f, "{:?} {}", self.kind, self.value)
        }
    }
}

/// Tokenize formula text
///
/// # Example
/// ```rust
/// use gridcalc_formula::{tokenize, Token, TokenKind};
///
/// let tokens = tokenize("SUM($A1, 2)").unwrap();
/// assert_eq!(tokens[0], Token::new(TokenKind::Function, "SUM"));
/// assert_eq!(tokens[2], Token::new(TokenKind::Ref, "$A1"));
/// assert!(tokens.last().unwrap().is_eof());
/// ```
pub fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    debug!("Tokenizing formula: {:?}", input);
    let tokens = Tokenizer::new(input).run()?;
    trace!("Tokens: {:?}", tokens);
    Ok(tokens)
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn run(mut self) -> FormulaResult<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
                continue;
            }

            let token = if c.is_ascii_digit() || c == '.' {
                self.scan_number()
            } else if self.rest().starts_with("<>") {
                // Must win over the single '<' and '>' below
                self.pos += 2;
                Token::new(TokenKind::Operator, "<>")
            } else if OPERATOR_CHARS.contains(c) {
                self.advance();
                Token::new(TokenKind::Operator, c)
            } else if c == '$' || c.is_ascii_alphabetic() {
                self.scan_ref_or_function(c)?
            } else if c == '"' {
                self.scan_string()?
            } else {
                return Err(FormulaError::UnknownCharacter(c));
            };

            tokens.push(token);
        }

        tokens.push(Token::eof());
        Ok(tokens)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;
        let mut seen_dot = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, &self.input[start..self.pos])
    }

    fn scan_ref_or_function(&mut self, first: char) -> FormulaResult<Token> {
        if let Some(reference) = regex_find!(r"^\$?[A-Za-z]+\$?[0-9]+", self.rest()) {
            self.pos += reference.len();
            return Ok(Token::new(TokenKind::Ref, reference));
        }

        let start = self.pos;
        while self.peek_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }

        if self.pos == start {
            // A '$' that does not begin a reference
            return Err(FormulaError::UnknownCharacter(first));
        }

        Ok(Token::new(TokenKind::Function, &self.input[start..self.pos]))
    }

    fn scan_string(&mut self) -> FormulaResult<Token> {
        self.advance(); // Skip opening quote
        let start = self.pos;

        while let Some(c) = self.peek_char() {
            if c == '"' {
                let value = self.input[start..self.pos].to_string();
                self.advance();
                return Ok(Token::new(TokenKind::Characters, value));
            }
            self.advance();
        }

        Err(FormulaError::UnterminatedString)
    }

    // === Helper methods ===

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}
