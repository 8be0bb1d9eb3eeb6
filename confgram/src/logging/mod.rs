//! Global logging module for confgram
//!
//! Provides thread-safe global logging tagged with the source being parsed,
//! coded events, and a small macro interface. Nothing is emitted until
//! [`init_global_logging`] has been called.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::runtime::LoggingPreferences;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static SOURCE_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from user preferences.
///
/// Failures are reported as `ERR002` through whichever logger is reachable.
pub fn init_global_logging(preferences: LoggingPreferences) -> Result<(), String> {
    initialize(preferences).map_err(|message| {
        safe_log_error(codes::system::INITIALIZATION_FAILURE, &message);
        message
    })
}

fn initialize(preferences: LoggingPreferences) -> Result<(), String> {
    config::init_runtime_preferences(preferences)
        .map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(LoggingService::with_config());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    for code in [
        codes::source::READ_FAILURE,
        codes::grammar::NO_MATCHING_RULE,
        codes::grammar::HANDLER_REJECTED,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Install a caller-built service, e.g. one backed by a [`MemoryLogger`]
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Whether debug events would reach the logger at all
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// SOURCE CONTEXT MANAGEMENT
// ============================================================================

pub fn set_source_context(source: &str) {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(source.to_string());
    });
}

pub fn clear_source_context() {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Run `f` with every event on this thread tagged with `source`.
/// The previous context is restored afterwards.
pub fn with_source_context<F, R>(source: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_source_context();
    set_source_context(source);
    let result = f();
    match previous {
        Some(previous) => set_source_context(&previous),
        None => clear_source_context(),
    }
    result
}

pub fn get_current_source_context() -> Option<String> {
    SOURCE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn finish_event(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if config::include_source_context() {
        if let Some(source) = get_current_source_context() {
            event = event.with_context("source", &source);
        }
    }

    event
}

fn dispatch(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Used by log_error!
pub fn log_error_with_context(
    code: Code,
    message: &str,
    line: Option<usize>,
    context: Vec<(&str, &str)>,
) {
    if !is_initialized() {
        return;
    }
    let mut event = LogEvent::error(code, message);
    if let Some(line) = line {
        event = event.with_line(line);
    }
    dispatch(finish_event(event, context));
}

/// Used by log_warning!
pub fn log_warning_with_context(
    code: Code,
    message: &str,
    line: Option<usize>,
    context: Vec<(&str, &str)>,
) {
    if !is_initialized() {
        return;
    }
    let mut event = LogEvent::warning_with_code(code, message);
    if let Some(line) = line {
        event = event.with_line(line);
    }
    dispatch(finish_event(event, context));
}

/// Used by log_success!
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    if !is_initialized() {
        return;
    }
    dispatch(finish_event(LogEvent::success(code, message), context));
}

/// Used by log_info!
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    if !is_initialized() {
        return;
    }
    dispatch(finish_event(LogEvent::info(message), context));
}

/// Used by log_debug!
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    if !is_initialized() {
        return;
    }
    dispatch(finish_event(LogEvent::debug(message), context));
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Error logging that falls back to stderr when uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
