//! Recursive-descent parser for decomposition sequences.

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::error::{FiguraError, Result};
use crate::figure::FigureKey;
use crate::ids::node::{CompositionNode, Operator};
use crate::ids::token::{IdsToken, tokenize};

/// Parser turning one sequence into a [`CompositionNode`].
///
/// The figure key is only carried for error reporting.
#[derive(Debug)]
pub struct IdsParser<'a> {
    figure: &'a FigureKey,
}

impl<'a> IdsParser<'a> {
    pub fn new(figure: &'a FigureKey) -> Self {
        IdsParser { figure }
    }

    /// Parse a single sequence (without locale tags).
    pub fn parse(&self, sequence: &str) -> Result<CompositionNode> {
        let tokens =
            tokenize(sequence).map_err(|e| self.error(sequence, e.to_string()))?;
        if tokens.is_empty() {
            return Err(self.error(sequence, "empty sequence"));
        }

        let mut stream = TokenStream {
            tokens: tokens.into_iter().peekable(),
            consumed: 0,
        };
        let node = self.parse_expression(&mut stream, sequence)?;

        if stream.tokens.peek().is_some() {
            let trailing = stream.tokens.count();
            return Err(self.error(
                sequence,
                format!(
                    "{trailing} trailing token(s) after a complete expression of {} token(s)",
                    stream.consumed
                ),
            ));
        }
        Ok(node)
    }

    fn parse_expression(
        &self,
        stream: &mut TokenStream<'_>,
        sequence: &str,
    ) -> Result<CompositionNode> {
        let Some(token) = stream.next() else {
            return Err(self.error(
                sequence,
                format!("missing operand after token {}", stream.consumed),
            ));
        };

        match token {
            IdsToken::Char(text) => Ok(CompositionNode::char(text)),
            IdsToken::Symbol(code) => Ok(CompositionNode::symbol(code)),
            IdsToken::Operator(operator) => self.parse_composite(operator, stream, sequence),
        }
    }

    fn parse_composite(
        &self,
        operator: Operator,
        stream: &mut TokenStream<'_>,
        sequence: &str,
    ) -> Result<CompositionNode> {
        let mut operands = Vec::with_capacity(operator.arity());
        for _ in 0..operator.arity() {
            operands.push(self.parse_expression(stream, sequence)?);
        }
        Ok(CompositionNode::composite(operator, operands))
    }

    fn error<M: Into<String>>(&self, sequence: &str, message: M) -> FiguraError {
        FiguraError::parse(self.figure, sequence, message)
    }
}

struct TokenStream<'a> {
    tokens: Peekable<IntoIter<IdsToken<'a>>>,
    consumed: usize,
}

impl<'a> TokenStream<'a> {
    fn next(&mut self) -> Option<IdsToken<'a>> {
        let token = self.tokens.next()?;
        self.consumed += 1;
        Some(token)
    }
}
