// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse configuration: {message}")]
    Parse { message: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        use crate::logging::codes;
        match self {
            ConfigError::Io { .. } => codes::config::CONFIG_READ_FAILURE,
            ConfigError::Parse { .. } => codes::config::CONFIG_PARSE_FAILURE,
            ConfigError::Invalid { .. } => codes::config::CONFIG_INVALID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverPreferences {
    /// Whether to emit an `I041` info event for every matched line
    pub log_matched_lines: bool,

    /// Whether to keep diagnostics in the parse report (counts are always kept)
    pub collect_diagnostics: bool,
}

impl Default for DriverPreferences {
    fn default() -> Self {
        Self {
            log_matched_lines: env::var(env_vars::DRIVER_LOG_MATCHED_LINES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            collect_diagnostics: env::var(env_vars::DRIVER_COLLECT_DIAGNOSTICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Minimum level that reaches the configured logger
    pub min_log_level: LogLevel,

    /// Whether to emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Whether to log to the console at all
    pub enable_console_logging: bool,

    /// Whether to tag events with the source being parsed
    pub include_source_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_source_context: env::var(env_vars::LOGGING_INCLUDE_SOURCE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub driver: DriverPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; missing tables and keys fall back to defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load a TOML settings file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.logging.enable_console_logging && self.logging.use_structured_logging {
            return Err(ConfigError::Invalid {
                message: "structured logging requires console logging to be enabled".to_string(),
            });
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Driver
    pub const DRIVER_LOG_MATCHED_LINES: &str = "CONFGRAM_DRIVER_LOG_MATCHED_LINES";
    pub const DRIVER_COLLECT_DIAGNOSTICS: &str = "CONFGRAM_DRIVER_COLLECT_DIAGNOSTICS";

    // Logging
    pub const LOGGING_MIN_LEVEL: &str = "CONFGRAM_LOGGING_MIN_LEVEL";
    pub const LOGGING_USE_STRUCTURED: &str = "CONFGRAM_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "CONFGRAM_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_INCLUDE_SOURCE_CONTEXT: &str = "CONFGRAM_LOGGING_INCLUDE_SOURCE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [driver]
            log_matched_lines = true

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert!(config.driver.log_matched_lines);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert_eq!(
            config.driver.collect_diagnostics,
            DriverPreferences::default().collect_diagnostics
        );
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let result = RuntimeConfig::from_toml_str("[driver\nlog_matched_lines = ");
        assert_matches!(result, Err(ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[logging]\nuse_structured_logging = true\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert!(config.logging.use_structured_logging);
    }

    #[test]
    fn test_load_missing_file() {
        let result = RuntimeConfig::load("does-not-exist.toml");
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_combination_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "[logging]\nuse_structured_logging = true\nenable_console_logging = false\n",
        )
        .unwrap();

        let result = RuntimeConfig::load(&path);
        assert_matches!(result, Err(ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_bundled_development_settings() {
        let config =
            RuntimeConfig::from_toml_str(include_str!("../../../config/development.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.driver.log_matched_lines);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let config = RuntimeConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("[driver]"));
        assert!(rendered.contains("[logging]"));
        assert_eq!(RuntimeConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
