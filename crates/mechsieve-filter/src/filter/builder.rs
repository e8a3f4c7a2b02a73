//! Incremental token stream assembly.
//!
//! [`ExpressionBuilder`] is what an interactive front end drives: each click or
//! keystroke appends one token, and tokens that would make the stream
//! ungrammatical are refused with [`FilterError::RejectedToken`] while the
//! builder stays as it was.

use tracing::trace;

use super::ast::ExpressionTree;
use super::error::{FilterError, FilterResult};
use super::token::{Operand, Operator, Token};

/// Accumulates a grammatical equipment token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionBuilder {
    tokens: Vec<Token>,
    depth: usize,
}

impl ExpressionBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays `tokens` through the builder.
    ///
    /// # Errors
    ///
    /// Returns the first `FilterError::RejectedToken`.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> FilterResult<Self> {
        let mut builder = Self::new();
        for token in tokens {
            builder.push(token)?;
        }
        Ok(builder)
    }

    /// Appends any token.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::RejectedToken` if the token cannot follow the
    /// current stream.
    pub fn push(&mut self, token: Token) -> FilterResult<()> {
        match token {
            Token::Operand(operand) => self.push_operand(operand),
            Token::Operator(op) => self.push_operator(op),
            Token::LeftParen => self.open_paren(),
            Token::RightParen => self.close_paren(),
        }
    }

    /// Appends an operand.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::RejectedToken` directly after another operand or `)`.
    pub fn push_operand(&mut self, operand: Operand) -> FilterResult<()> {
        if !self.can_push_operand() {
            return Err(FilterError::rejected(
                operand.to_string(),
                "an operator must come first",
            ));
        }
        self.append(Token::Operand(operand));
        Ok(())
    }

    /// Appends `&` or `|`.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::RejectedToken` at the start of the stream, after
    /// another operator, or after `(`.
    pub fn push_operator(&mut self, op: Operator) -> FilterResult<()> {
        if !self.can_push_operator() {
            return Err(FilterError::rejected(
                format!("'{op}'"),
                "an operand must come first",
            ));
        }
        self.append(Token::Operator(op));
        Ok(())
    }

    /// Opens a group.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::RejectedToken` directly after an operand or `)`.
    pub fn open_paren(&mut self) -> FilterResult<()> {
        if !self.can_push_operand() {
            return Err(FilterError::rejected("'('", "an operator must come first"));
        }
        self.append(Token::LeftParen);
        self.depth += 1;
        Ok(())
    }

    /// Closes the innermost open group.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::RejectedToken` when no group is open or the group
    /// would be empty or end in an operator.
    pub fn close_paren(&mut self) -> FilterResult<()> {
        if self.depth == 0 {
            return Err(FilterError::rejected("')'", "no group is open"));
        }
        if !self.can_close_paren() {
            return Err(FilterError::rejected("')'", "the group needs an operand first"));
        }
        self.append(Token::RightParen);
        self.depth -= 1;
        Ok(())
    }

    /// Removes the last token, returning it.
    pub fn undo(&mut self) -> Option<Token> {
        let token = self.tokens.pop()?;
        match token {
            Token::LeftParen => self.depth -= 1,
            Token::RightParen => self.depth += 1,
            _ => {}
        }
        Some(token)
    }

    /// Removes every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.depth = 0;
    }

    /// Returns true if an operand or `(` may come next.
    pub fn can_push_operand(&self) -> bool {
        !self.tokens.last().is_some_and(Token::ends_term)
    }

    /// Returns true if `&` or `|` may come next.
    pub fn can_push_operator(&self) -> bool {
        self.tokens.last().is_some_and(Token::ends_term)
    }

    /// Returns true if `)` may come next.
    pub fn can_close_paren(&self) -> bool {
        self.depth > 0 && self.can_push_operator()
    }

    /// Returns true if the stream compiles as it stands.
    pub fn is_complete(&self) -> bool {
        self.depth == 0 && (self.tokens.is_empty() || self.can_push_operator())
    }

    /// Number of groups currently open.
    pub fn open_groups(&self) -> usize {
        self.depth
    }

    /// Returns true if no tokens have been added.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The accumulated tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consumes the builder, returning its tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Renders the stream in the textual expression syntax.
    pub fn render(&self) -> String {
        super::token::render_tokens(&self.tokens)
    }

    /// Compiles the accumulated tokens.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::MalformedExpression` while a group is open or
    /// the stream ends in an operator.
    pub fn compile(&self) -> FilterResult<ExpressionTree> {
        if self.depth > 0 {
            return Err(FilterError::malformed(format!(
                "{} unclosed '('",
                self.depth
            )));
        }
        ExpressionTree::compile(&self.tokens)
    }

    fn append(&mut self, token: Token) {
        trace!(token = %token, "expression token added");
        self.tokens.push(token);
    }
}
