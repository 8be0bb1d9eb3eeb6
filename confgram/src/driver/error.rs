//! Fatal parse errors
//!
//! These abort a parse. Lines that fail to match are not errors at this
//! level; they are collected as diagnostics in the parse report.

use crate::logging::{codes, Code};
use std::io;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid source path: {path}")]
    InvalidPath { path: String },

    #[error("I/O error reading source: {message}")]
    Io { message: String },
}

impl ParseError {
    /// Map an error from opening `path`
    pub fn from_open_error(error: &io::Error, path: &str) -> Self {
        let path = path.to_string();
        match error.kind() {
            io::ErrorKind::NotFound => ParseError::SourceNotFound { path },
            io::ErrorKind::PermissionDenied => ParseError::PermissionDenied { path },
            _ => ParseError::Io {
                message: format!("Failed to open '{}': {}", path, error),
            },
        }
    }

    /// Map an error from reading the physical line after `line`
    pub fn from_read_error(error: &io::Error, line: usize) -> Self {
        ParseError::Io {
            message: format!("Read failed after physical line {}: {}", line, error),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            ParseError::SourceNotFound { .. } => codes::source::SOURCE_NOT_FOUND,
            ParseError::PermissionDenied { .. } => codes::source::PERMISSION_DENIED,
            ParseError::InvalidPath { .. } => codes::source::INVALID_PATH,
            ParseError::Io { .. } => codes::source::READ_FAILURE,
        }
    }
}
