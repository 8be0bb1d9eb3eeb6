//! Logging preferences storage
//!
//! Compile-time limits come from [`crate::config::compile_time`]; the user
//! preferences are installed once at startup and fall back to defaults.

use crate::config::compile_time::logging::LOG_BUFFER_SIZE;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences. Fails if called twice.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    if !preferences.enable_console_logging && preferences.use_structured_logging {
        return Err("Structured logging requires console logging".to_string());
    }

    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Whether events are tagged with the source currently being parsed
pub fn include_source_context() -> bool {
    get_runtime_preferences().include_source_context
}

/// Get in-memory buffer size (compile-time constant)
pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}
