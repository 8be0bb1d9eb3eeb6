//! Flat, ordered rule matching
//!
//! A [`Grammar`] holds rules in registration order. Matching walks the rules
//! once and stops at the first whose shape fits the token sequence; that
//! rule's handler runs exactly once. A general rule registered early shadows
//! any more specific rule registered after it.

pub mod error;
pub mod rule;

use crate::tokens::{Token, TokenType};
use crate::log_debug;

pub use error::HandlerError;
pub use rule::{Rule, RuleHandler};

/// Result of matching one token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The rule at this index matched and its handler succeeded
    Matched { rule: usize },
    /// No rule has this shape; no handler ran
    NoMatch,
    /// The rule at this index matched but its handler reported failure
    Rejected { rule: usize, error: HandlerError },
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// Ordered rule set parameterized by the caller's parse context
pub struct Grammar<C = ()> {
    rules: Vec<Rule<C>>,
}

impl<C> Grammar<C> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule with a closure handler. Returns the rule's index.
    pub fn register_rule<I, T, F>(&mut self, token_types: I, handler: F) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Into<TokenType>,
        F: FnMut(&[Token], &mut C) -> Result<(), HandlerError> + 'static,
    {
        self.register_handler(token_types, handler)
    }

    /// Append a rule with any [`RuleHandler`]. Returns the rule's index.
    pub fn register_handler<I, T, H>(&mut self, token_types: I, handler: H) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Into<TokenType>,
        H: RuleHandler<C> + 'static,
    {
        let rule = Rule::new(token_types, handler);
        log_debug!("Registered rule",
            "pattern" => rule.pattern(),
            "index" => self.rules.len()
        );
        self.rules.push(rule);
        self.rules.len() - 1
    }

    /// Try rules in order and run the first matching rule's handler
    pub fn match_tokens(&mut self, tokens: &[Token], context: &mut C) -> MatchOutcome {
        let Some(index) = self.rules.iter().position(|rule| rule.accepts(tokens)) else {
            return MatchOutcome::NoMatch;
        };

        match self.rules[index].invoke(tokens, context) {
            Ok(()) => MatchOutcome::Matched { rule: index },
            Err(error) => MatchOutcome::Rejected { rule: index, error },
        }
    }

    /// Boolean form of [`Grammar::match_tokens`]
    pub fn matches(&mut self, tokens: &[Token], context: &mut C) -> bool {
        self.match_tokens(tokens, context).is_match()
    }

    pub fn rule(&self, index: usize) -> Option<&Rule<C>> {
        self.rules.get(index)
    }

    pub fn rules(&self) -> &[Rule<C>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<C> Default for Grammar<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for Grammar<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar").field("rules", &self.rules).finish()
    }
}
