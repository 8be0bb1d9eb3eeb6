//! Lexical analysis
//!
//! Splits a logical line into whitespace-delimited words and assigns each a
//! [`TokenType`](crate::tokens::TokenType) from the registered vocabulary.

pub mod analyzer;
pub mod detectors;

pub use analyzer::Lexer;
pub use detectors::{is_float, is_number, is_string, Detector};
