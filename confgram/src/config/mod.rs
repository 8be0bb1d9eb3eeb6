//! Configuration module for confgram
//!
//! Compile-time limits live in [`constants`]; user preferences that may be
//! changed at runtime (environment variables or a TOML settings file) live in
//! [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{ConfigError, DriverPreferences, LoggingPreferences, RuntimeConfig};
