//! Recursive descent compiler from token streams to expression trees.

use super::ast::{ExpressionNode, ExpressionTree};
use super::error::{FilterError, FilterResult};
use super::token::{Operator, Token};

/// Compiler for equipment token streams.
///
/// The token stream normally comes from an
/// [`ExpressionBuilder`](super::ExpressionBuilder), which already refuses
/// ungrammatical tokens, but the parser validates independently and never
/// trusts its input.
///
/// # Grammar
///
/// ```text
/// expression ::= term ("|" term)*
/// term       ::= factor ("&" factor)*
/// factor     ::= operand | "(" expression ")"
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `&` (AND)
/// 2. `|` (OR)
///
/// # Example
///
/// ```
/// use mechsieve_filter_rs::filter::{ExpressionNode, ExpressionParser, Operand, Operator, Token};
///
/// let tokens = vec![
///     Operand::at_least("A", 1).into(),
///     Token::AND,
///     Operand::at_least("B", 1).into(),
///     Token::OR,
///     Operand::at_least("C", 1).into(),
/// ];
/// let tree = ExpressionParser::parse(&tokens).unwrap();
/// assert!(matches!(tree.root(), Some(ExpressionNode::Group { op: Operator::Or, .. })));
/// ```
pub struct ExpressionParser<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> ExpressionParser<'a> {
    /// Compiles a token stream into an expression tree.
    ///
    /// An empty stream yields the empty tree.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::MalformedExpression` if the stream is not
    /// grammatical: unbalanced parentheses, an empty group, an operator at
    /// either end, or two operators or two operands next to each other.
    pub fn parse(tokens: &'a [Token]) -> FilterResult<ExpressionTree> {
        if tokens.is_empty() {
            return Ok(ExpressionTree::empty());
        }

        let mut parser = Self {
            tokens,
            position: 0,
        };
        let root = parser.parse_expression()?;

        // Everything must be consumed
        if let Some(remaining) = parser.peek() {
            return Err(match remaining {
                Token::RightParen => parser.error("unmatched ')'"),
                other => parser.error(format!("expected an operator before '{other}'")),
            });
        }

        Ok(ExpressionTree::from_root(root))
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Checks if the current token matches the expected token.
    fn check(&self, expected: &Token) -> bool {
        self.peek() == Some(expected)
    }

    fn error(&self, what: impl std::fmt::Display) -> FilterError {
        FilterError::malformed(format!("{what} at token {}", self.position + 1))
    }

    /// Parses OR expressions: `term ("|" term)*`
    fn parse_expression(&mut self) -> FilterResult<ExpressionNode> {
        let mut terms = vec![self.parse_term()?];

        while self.check(&Token::OR) {
            self.advance(); // consume '|'
            terms.push(self.parse_term()?);
        }

        Ok(ExpressionNode::group(Operator::Or, terms))
    }

    /// Parses AND expressions: `factor ("&" factor)*`
    fn parse_term(&mut self) -> FilterResult<ExpressionNode> {
        let mut factors = vec![self.parse_factor()?];

        while self.check(&Token::AND) {
            self.advance(); // consume '&'
            factors.push(self.parse_factor()?);
        }

        Ok(ExpressionNode::group(Operator::And, factors))
    }

    /// Parses factors: `operand | "(" expression ")"`
    fn parse_factor(&mut self) -> FilterResult<ExpressionNode> {
        let Some(token) = self.peek() else {
            return Err(self.error("expression ends where an operand was expected"));
        };

        match token {
            Token::Operand(operand) => {
                self.advance();
                Ok(ExpressionNode::leaf(operand.clone()))
            }
            Token::LeftParen => {
                self.advance(); // consume '('
                if self.check(&Token::RightParen) {
                    return Err(self.error("empty parentheses"));
                }
                let inner = self.parse_expression()?;
                if !self.check(&Token::RightParen) {
                    return Err(match self.peek() {
                        None => self.error("unclosed '('"),
                        Some(other) => self.error(format!("expected an operator before '{other}'")),
                    });
                }
                self.advance(); // consume ')'
                Ok(inner)
            }
            Token::Operator(op) => Err(self.error(format!("expected an operand before '{op}'"))),
            Token::RightParen => Err(self.error("expected an operand before ')'")),
        }
    }
}
