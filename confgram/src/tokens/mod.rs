//! Token types produced by the lexer
//!
//! A [`Token`] pairs the raw text of one whitespace-delimited unit with its
//! [`TokenType`]. Types are open-ended strings: keywords are their own type
//! name, pattern classes use names such as [`NUMBER`] or [`STRING`].

pub mod token;

pub use token::{Token, TokenType, FLOAT, NUMBER, STRING};
