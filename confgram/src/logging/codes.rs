//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Source acquisition and reading error codes (fatal tier)
pub mod source {
    use super::Code;

    pub const SOURCE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_PATH: Code = Code::new("E006");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const READ_FAILURE: Code = Code::new("E011");
    pub const INVALID_ENCODING: Code = Code::new("W012");
}

/// Settings file error codes
pub mod config {
    use super::Code;

    pub const CONFIG_READ_FAILURE: Code = Code::new("E014");
    pub const CONFIG_PARSE_FAILURE: Code = Code::new("E015");
    pub const CONFIG_INVALID: Code = Code::new("E016");
}

/// Vocabulary registration codes
pub mod lexical {
    use super::Code;

    pub const DUPLICATE_KEYWORD: Code = Code::new("W020");
    pub const DUPLICATE_DETECTOR: Code = Code::new("W021");
}

/// Rule matching codes (diagnostic tier)
pub mod grammar {
    use super::Code;

    pub const NO_MATCHING_RULE: Code = Code::new("E040");
    pub const HANDLER_REJECTED: Code = Code::new("E041");
    pub const UNTERMINATED_CONTINUATION: Code = Code::new("W042");
    pub const DIAGNOSTIC_LIMIT_REACHED: Code = Code::new("W043");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const SOURCE_OPENED: Code = Code::new("I006");
    pub const PARSE_COMPLETE: Code = Code::new("I040");
    pub const LINE_MATCHED: Code = Code::new("I041");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check logging configuration and settings file",
            ),
            // Source
            ErrorMetadata::new(
                "E005",
                "Source",
                Severity::Medium,
                false,
                true,
                "Source file could not be found",
                "Verify the file path exists",
            ),
            ErrorMetadata::new(
                "E006",
                "Source",
                Severity::Medium,
                false,
                true,
                "Source path is not a readable file",
                "Pass a regular file, not a directory",
            ),
            ErrorMetadata::new(
                "E009",
                "Source",
                Severity::High,
                false,
                true,
                "Permission denied while opening source",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E011",
                "Source",
                Severity::High,
                false,
                true,
                "I/O failure while reading source",
                "Check the underlying device or stream",
            ),
            ErrorMetadata::new(
                "W012",
                "Source",
                Severity::Low,
                true,
                false,
                "Source line contains invalid UTF-8; bytes were replaced with U+FFFD",
                "Re-encode the file as UTF-8",
            ),
            // Settings
            ErrorMetadata::new(
                "E014",
                "Config",
                Severity::Medium,
                true,
                false,
                "Settings file could not be read",
                "Verify the settings path, or omit it to use defaults",
            ),
            ErrorMetadata::new(
                "E015",
                "Config",
                Severity::Medium,
                true,
                false,
                "Settings file is not valid TOML",
                "Fix the TOML syntax in the settings file",
            ),
            ErrorMetadata::new(
                "E016",
                "Config",
                Severity::Medium,
                true,
                false,
                "Settings are inconsistent",
                "Review the combination of logging options",
            ),
            // Lexical
            ErrorMetadata::new(
                "W020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Keyword registered more than once",
                "Remove the duplicate registration",
            ),
            ErrorMetadata::new(
                "W021",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Detector type registered more than once",
                "Remove the duplicate registration; the first one is kept",
            ),
            // Grammar
            ErrorMetadata::new(
                "E040",
                "Grammar",
                Severity::Medium,
                true,
                false,
                "Line does not match any registered rule",
                "Check the statement against the supported rule shapes",
            ),
            ErrorMetadata::new(
                "E041",
                "Grammar",
                Severity::Medium,
                true,
                false,
                "Rule handler rejected the line",
                "Check the statement values",
            ),
            ErrorMetadata::new(
                "W042",
                "Grammar",
                Severity::Low,
                true,
                false,
                "Line continuation reached end of input",
                "Remove the trailing backslash from the last line",
            ),
            ErrorMetadata::new(
                "W043",
                "Grammar",
                Severity::Low,
                true,
                false,
                "Diagnostic limit reached; further diagnostics are only counted",
                "Fix the reported lines and parse again",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_constant_has_metadata() {
        let all = [
            system::INITIALIZATION_FAILURE,
            source::SOURCE_NOT_FOUND,
            source::INVALID_PATH,
            source::PERMISSION_DENIED,
            source::INVALID_ENCODING,
            source::READ_FAILURE,
            config::CONFIG_READ_FAILURE,
            config::CONFIG_PARSE_FAILURE,
            config::CONFIG_INVALID,
            lexical::DUPLICATE_KEYWORD,
            lexical::DUPLICATE_DETECTOR,
            grammar::NO_MATCHING_RULE,
            grammar::HANDLER_REJECTED,
            grammar::UNTERMINATED_CONTINUATION,
            grammar::DIAGNOSTIC_LIMIT_REACHED,
        ];

        for code in all {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_diagnostic_tier_is_recoverable() {
        assert!(is_recoverable(grammar::NO_MATCHING_RULE.as_str()));
        assert!(!requires_halt(grammar::HANDLER_REJECTED.as_str()));
        assert_eq!(get_category(grammar::NO_MATCHING_RULE.as_str()), "Grammar");
    }

    #[test]
    fn test_fatal_tier_requires_halt() {
        assert!(requires_halt(source::READ_FAILURE.as_str()));
        assert!(!requires_halt(source::INVALID_ENCODING.as_str()));
        assert!(!is_recoverable(source::SOURCE_NOT_FOUND.as_str()));
        assert_eq!(get_severity(source::PERMISSION_DENIED.as_str()), Severity::High);
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_action("Z999"), "No specific action available");
        assert_eq!(get_severity("Z999"), Severity::Medium);
    }
}
