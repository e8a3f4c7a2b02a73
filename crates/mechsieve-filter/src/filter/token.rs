//! Tokens of the equipment expression language.
//!
//! A token stream is what the [`ExpressionBuilder`](super::ExpressionBuilder)
//! accumulates and what the parser compiles into an
//! [`ExpressionTree`](super::ExpressionTree).

use std::fmt;

use mechsieve_catalog_rs::WeaponClass;
use serde::{Deserialize, Serialize};

/// How a leaf compares the inventory quantity against its threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Quantity must reach the threshold.
    #[default]
    AtLeast,
    /// Quantity must stay below the threshold.
    LessThan,
}

impl Comparison {
    /// Returns the operator prefix used in textual expressions.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::AtLeast => ">=",
            Comparison::LessThan => "<",
        }
    }
}

/// What an operand counts: one exact equipment key or every member of a weapon class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// An exact equipment key, compared by name against inventory entries.
    Equipment(String),
    /// A weapon class, matched by its name rule.
    Class(WeaponClass),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Equipment(key) if needs_quotes(key) => {
                write!(f, "\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Target::Equipment(key) => f.write_str(key),
            Target::Class(class) => write!(f, "class:{class}"),
        }
    }
}

/// Returns true if a key must be quoted to re-lex as a single equipment target.
fn needs_quotes(key: &str) -> bool {
    let lower = key.to_lowercase();
    key.is_empty()
        || lower.starts_with("class:")
        || key.starts_with(['"', '\''])
        || key
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '&' | '|'))
}

/// A quantity test against one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand {
    pub target: Target,
    pub quantity: u32,
    #[serde(default)]
    pub comparison: Comparison,
}

impl Operand {
    /// "At least `quantity` of the equipment `key`".
    pub fn at_least(key: impl Into<String>, quantity: u32) -> Self {
        Self {
            target: Target::Equipment(key.into()),
            quantity,
            comparison: Comparison::AtLeast,
        }
    }

    /// "Fewer than `quantity` of the equipment `key`".
    pub fn less_than(key: impl Into<String>, quantity: u32) -> Self {
        Self {
            target: Target::Equipment(key.into()),
            quantity,
            comparison: Comparison::LessThan,
        }
    }

    /// A weapon-class operand.
    pub fn class(class: WeaponClass, quantity: u32, comparison: Comparison) -> Self {
        Self {
            target: Target::Class(class),
            quantity,
            comparison,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.comparison {
            Comparison::AtLeast => write!(f, "{} {}", self.quantity, self.target),
            Comparison::LessThan => write!(f, "<{} {}", self.quantity, self.target),
        }
    }
}

/// A boolean connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    And,
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => f.write_str("&"),
            Operator::Or => f.write_str("|"),
        }
    }
}

/// A token in an equipment expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Operand(Operand),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    /// Shorthand for `Token::Operator(Operator::And)`.
    pub const AND: Token = Token::Operator(Operator::And);

    /// Shorthand for `Token::Operator(Operator::Or)`.
    pub const OR: Token = Token::Operator(Operator::Or);

    /// Returns true for tokens after which an operator or `)` may follow.
    pub fn ends_term(&self) -> bool {
        matches!(self, Token::Operand(_) | Token::RightParen)
    }
}

impl From<Operand> for Token {
    fn from(operand: Operand) -> Self {
        Token::Operand(operand)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(operand) => write!(f, "{operand}"),
            Token::Operator(op) => write!(f, "{op}"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// Renders a token stream back into the textual expression syntax.
///
/// The output re-lexes to the same tokens.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::RightParen => out.push(')'),
            _ => {
                if !out.is_empty() && !out.ends_with('(') {
                    out.push(' ');
                }
                out.push_str(&token.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_display() {
        assert_eq!(Operand::at_least("MediumLaser", 2).to_string(), "2 MediumLaser");
        assert_eq!(Operand::less_than("SRM 6", 1).to_string(), "<1 \"SRM 6\"");
        assert_eq!(
            Operand::class(WeaponClass::Missile, 3, Comparison::AtLeast).to_string(),
            "3 class:missile"
        );
    }

    #[test]
    fn test_render_tokens() {
        let tokens = vec![
            Operand::at_least("A", 1).into(),
            Token::AND,
            Token::LeftParen,
            Operand::at_least("B", 2).into(),
            Token::OR,
            Operand::less_than("C", 3).into(),
            Token::RightParen,
        ];
        assert_eq!(render_tokens(&tokens), "1 A & (2 B | <3 C)");
    }

    #[test]
    fn test_ends_term() {
        assert!(Token::RightParen.ends_term());
        assert!(Token::from(Operand::at_least("A", 1)).ends_term());
        assert!(!Token::LeftParen.ends_term());
        assert!(!Token::AND.ends_term());
    }
}
