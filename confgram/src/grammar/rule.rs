use super::error::HandlerError;
use crate::tokens::{Token, TokenType};
use std::fmt;

/// Action bound to a rule.
///
/// Receives the matched tokens and the caller's parse context. Returning an
/// error marks the line as failed without stopping the parse.
pub trait RuleHandler<C> {
    fn handle(&mut self, tokens: &[Token], context: &mut C) -> Result<(), HandlerError>;
}

impl<C, F> RuleHandler<C> for F
where
    F: FnMut(&[Token], &mut C) -> Result<(), HandlerError>,
{
    fn handle(&mut self, tokens: &[Token], context: &mut C) -> Result<(), HandlerError> {
        self(tokens, context)
    }
}

/// Fixed-length sequence of expected token types bound to a handler
pub struct Rule<C> {
    token_types: Vec<TokenType>,
    handler: Box<dyn RuleHandler<C>>,
}

impl<C> Rule<C> {
    pub fn new<I, T, H>(token_types: I, handler: H) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TokenType>,
        H: RuleHandler<C> + 'static,
    {
        Self {
            token_types: token_types.into_iter().map(Into::into).collect(),
            handler: Box::new(handler),
        }
    }

    pub fn token_types(&self) -> &[TokenType] {
        &self.token_types
    }

    pub fn len(&self) -> usize {
        self.token_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_types.is_empty()
    }

    /// Rule shape as space-separated type names, e.g. `listen on STRING`
    pub fn pattern(&self) -> String {
        self.token_types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Exact length and positional type match. An empty rule matches nothing.
    pub fn accepts(&self, tokens: &[Token]) -> bool {
        !tokens.is_empty()
            && tokens.len() == self.token_types.len()
            && tokens
                .iter()
                .zip(&self.token_types)
                .all(|(token, expected)| token.token_type() == expected)
    }

    pub(crate) fn invoke(&mut self, tokens: &[Token], context: &mut C) -> Result<(), HandlerError> {
        self.handler.handle(tokens, context)
    }
}

impl<C> fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern())
            .finish_non_exhaustive()
    }
}
