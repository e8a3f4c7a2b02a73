//! Lexer for the textual spelling of equipment expressions.
//!
//! The text syntax maps one-to-one onto [`Token`]s:
//!
//! ```text
//! operand  ::= [ "<" | ">=" ] quantity target
//! target   ::= "class:" name | quoted-string | bare-word
//! operator ::= "&" | "and" | "|" | "or"
//! paren    ::= "(" | ")"
//! ```
//!
//! A leading `<` makes the operand a "less than" test; otherwise it is an
//! "at least" test. Bare words end at whitespace, parentheses and `&`/`|`.

use std::iter::Peekable;
use std::str::Chars;

use mechsieve_catalog_rs::WeaponClass;

use super::error::{FilterError, FilterResult};
use super::token::{Comparison, Operand, Operator, Target, Token};

/// Prefix selecting a weapon-class target.
const CLASS_PREFIX: &str = "class:";

/// Lexer for tokenizing textual equipment expressions.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    fn error_at(&self, position: usize, what: impl std::fmt::Display) -> FilterError {
        FilterError::malformed(format!("{what} at position {position}"))
    }

    /// Reads a bare word: everything up to whitespace, a parenthesis or an operator symbol.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '&' | '|' | '(' | ')') {
                break;
            }
            word.push(c);
            self.next_char();
        }
        word
    }

    /// Reads a quoted string; the opening quote has not been consumed yet.
    fn read_quoted(&mut self, quote: char) -> FilterResult<String> {
        let start = self.position;
        self.next_char();

        let mut result = String::new();
        loop {
            match self.next_char() {
                Some(c) if c == quote => return Ok(result),
                Some('\\') => {
                    if let Some(escaped) = self.next_char() {
                        result.push(escaped);
                    }
                }
                Some(c) => result.push(c),
                None => return Err(self.error_at(start, "unterminated quoted name")),
            }
        }
    }

    fn read_quantity(&mut self) -> FilterResult<u32> {
        let start = self.position;
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            digits.push(c);
            self.next_char();
        }
        if digits.is_empty() {
            return Err(self.error_at(start, "expected a quantity"));
        }
        digits
            .parse::<u32>()
            .map_err(|_| self.error_at(start, format!("quantity '{digits}' is too large")))
    }

    fn read_target(&mut self) -> FilterResult<Target> {
        self.skip_whitespace();
        let start = self.position;

        let text = match self.peek() {
            Some(q @ ('"' | '\'')) => return self.read_quoted(q).map(Target::Equipment),
            Some(_) => self.read_word(),
            None => String::new(),
        };
        if text.is_empty() {
            return Err(self.error_at(start, "expected an equipment key or class"));
        }
        parse_target(&text)
    }

    fn read_operand(&mut self) -> FilterResult<Token> {
        let comparison = match self.peek() {
            Some('<') => {
                self.next_char();
                Comparison::LessThan
            }
            Some('>') => {
                let start = self.position;
                self.next_char();
                if self.next_char() != Some('=') {
                    return Err(self.error_at(start, "expected '>='"));
                }
                Comparison::AtLeast
            }
            _ => Comparison::AtLeast,
        };
        self.skip_whitespace();
        let quantity = self.read_quantity()?;
        let target = self.read_target()?;

        Ok(Token::Operand(Operand {
            target,
            quantity,
            comparison,
        }))
    }

    /// Returns the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> FilterResult<Option<Token>> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let start = self.position;

        let token = match c {
            '&' => {
                self.next_char();
                Token::Operator(Operator::And)
            }
            '|' => {
                self.next_char();
                Token::Operator(Operator::Or)
            }
            '(' => {
                self.next_char();
                Token::LeftParen
            }
            ')' => {
                self.next_char();
                Token::RightParen
            }
            '<' | '>' => self.read_operand()?,
            _ if c.is_ascii_digit() => self.read_operand()?,
            _ if c.is_alphabetic() => {
                let word = self.read_word();
                match word.to_lowercase().as_str() {
                    "and" => Token::Operator(Operator::And),
                    "or" => Token::Operator(Operator::Or),
                    _ => {
                        return Err(self.error_at(
                            start,
                            format!("expected a quantity before '{word}'"),
                        ))
                    }
                }
            }
            _ => return Err(self.error_at(start, format!("unexpected character '{c}'"))),
        };

        Ok(Some(token))
    }

    /// Collects all tokens, failing on the first lexical error.
    pub fn tokenize(mut self) -> FilterResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Tokenizes a textual expression.
pub fn tokenize(input: &str) -> FilterResult<Vec<Token>> {
    Lexer::new(input).tokenize()
}

/// Reads one operand target: `class:NAME` or an equipment key.
///
/// The whole trimmed text is the key, so `Medium Laser` needs no quotes here.
pub fn parse_target(text: &str) -> FilterResult<Target> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FilterError::malformed("expected an equipment key or class"));
    }

    let lower = text.to_lowercase();
    match lower.strip_prefix(CLASS_PREFIX) {
        Some(name) => name.parse::<WeaponClass>().map(Target::Class).map_err(|_| {
            FilterError::unknown_value(
                "weapon class",
                name,
                WeaponClass::all().map(WeaponClass::label),
            )
        }),
        None => Ok(Target::Equipment(text.to_string())),
    }
}
