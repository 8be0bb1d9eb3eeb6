//! Line-oriented configuration grammars.
//!
//! Register keywords and pattern detectors on a [`Lexer`], register
//! fixed-shape rules with handlers on a [`Grammar`], then run a source
//! through a [`Configuration`]:
//!
//! ```
//! use confgram::{Configuration, Grammar, Lexer, STRING};
//!
//! let mut lexer = Lexer::with_builtin_detectors();
//! lexer.register_keyword("listen");
//! lexer.register_keyword("on");
//!
//! let mut grammar: Grammar<Vec<String>> = Grammar::new();
//! grammar.register_rule(["listen", "on", STRING], |tokens, listeners| {
//!     listeners.push(tokens[2].text().to_string());
//!     Ok(())
//! });
//!
//! let mut config = Configuration::new(lexer, grammar);
//! let mut listeners = Vec::new();
//! let report = config.parse_str("listen on \\\n  127.0.0.1\n", &mut listeners).unwrap();
//!
//! assert!(report.success());
//! assert_eq!(listeners, vec!["127.0.0.1"]);
//! ```

// Internal modules
pub mod config;
pub mod driver;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;

// Re-export key types for library consumers
pub use config::{ConfigError, DriverPreferences, LoggingPreferences, RuntimeConfig};
pub use driver::{Configuration, Diagnostic, DiagnosticKind, ParseError, ParseReport};
pub use grammar::{Grammar, HandlerError, MatchOutcome, Rule, RuleHandler};
pub use lexical::Lexer;
pub use tokens::{Token, TokenType, FLOAT, NUMBER, STRING};
