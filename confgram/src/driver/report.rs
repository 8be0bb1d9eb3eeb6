//! Parse reports and per-line diagnostics

use crate::config::compile_time::driver::MAX_RECORDED_DIAGNOSTICS;
use crate::logging::{codes, Code};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Why a logical line failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No registered rule has the line's token shape
    NoMatchingRule,
    /// A rule matched but its handler refused the line
    HandlerRejected { rule: String, message: String },
}

/// A failed logical line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    /// 1-based logical line number
    pub line: usize,
    /// 1-based physical line where the logical line starts
    pub physical_line: usize,
    /// Raw continuation-joined text
    pub text: String,
}

impl Diagnostic {
    pub fn no_matching_rule(line: usize, physical_line: usize, text: &str) -> Self {
        Self {
            kind: DiagnosticKind::NoMatchingRule,
            line,
            physical_line,
            text: text.to_string(),
        }
    }

    pub fn handler_rejected(
        line: usize,
        physical_line: usize,
        text: &str,
        rule: String,
        message: String,
    ) -> Self {
        Self {
            kind: DiagnosticKind::HandlerRejected { rule, message },
            line,
            physical_line,
            text: text.to_string(),
        }
    }

    pub fn code(&self) -> Code {
        match self.kind {
            DiagnosticKind::NoMatchingRule => codes::grammar::NO_MATCHING_RULE,
            DiagnosticKind::HandlerRejected { .. } => codes::grammar::HANDLER_REJECTED,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::NoMatchingRule => "line does not match any rule".to_string(),
            DiagnosticKind::HandlerRejected { rule, message } => {
                format!("rule `{}` rejected line: {}", rule, message)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error on line {}: {}", self.line, self.text)?;
        if let DiagnosticKind::HandlerRejected { message, .. } = &self.kind {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

/// Outcome of parsing one source to completion
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// File path or stream label
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Logical lines read, blank ones included
    pub lines_read: usize,
    pub physical_lines_read: usize,
    pub blank_lines: usize,
    pub matched_lines: usize,
    pub unmatched_lines: usize,
    pub rejected_lines: usize,
    /// Input ended while a continuation was pending
    pub continued_to_eof: bool,
    /// Logical lines whose invalid UTF-8 was replaced before tokenizing
    pub lossy_lines: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics counted but not stored
    pub suppressed_diagnostics: usize,
}

impl ParseReport {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            lines_read: 0,
            physical_lines_read: 0,
            blank_lines: 0,
            matched_lines: 0,
            unmatched_lines: 0,
            rejected_lines: 0,
            continued_to_eof: false,
            lossy_lines: 0,
            diagnostics: Vec::new(),
            suppressed_diagnostics: 0,
        }
    }

    /// True when every non-blank logical line matched a rule and its handler succeeded
    pub fn success(&self) -> bool {
        self.failed_lines() == 0
    }

    pub fn failed_lines(&self) -> usize {
        self.unmatched_lines + self.rejected_lines
    }

    /// Store a diagnostic, or count it once the store is full.
    ///
    /// Returns `true` only for the first diagnostic that does not fit.
    pub(crate) fn record(&mut self, diagnostic: Diagnostic, keep: bool) -> bool {
        match diagnostic.kind {
            DiagnosticKind::NoMatchingRule => self.unmatched_lines += 1,
            DiagnosticKind::HandlerRejected { .. } => self.rejected_lines += 1,
        }

        if !keep {
            return false;
        }

        if self.diagnostics.len() < MAX_RECORDED_DIAGNOSTICS {
            self.diagnostics.push(diagnostic);
            false
        } else {
            self.suppressed_diagnostics += 1;
            self.suppressed_diagnostics == 1
        }
    }

    /// One-line summary, e.g. `example.conf: 4 lines, 3 matched, 1 failed, 0 blank`
    pub fn summary(&self) -> String {
        format!(
            "{}: {} lines, {} matched, {} failed, {} blank in {:.2}ms",
            self.source,
            self.lines_read,
            self.matched_lines,
            self.failed_lines(),
            self.blank_lines,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }

    /// Cargo-style rendering of every stored diagnostic
    pub fn format_diagnostics(&self) -> String {
        let mut output = String::new();

        for diagnostic in &self.diagnostics {
            let gutter = diagnostic.physical_line.to_string();
            let pad = " ".repeat(gutter.len());

            output.push_str(&format!(
                "error[{}]: {}\n",
                diagnostic.code(),
                diagnostic.message()
            ));
            output.push_str(&format!(
                "{}--> {}:{}\n",
                pad, self.source, diagnostic.physical_line
            ));
            output.push_str(&format!("{} |\n", pad));
            output.push_str(&format!("{} | {}\n", gutter, diagnostic.text));
            output.push_str(&format!("{} |\n\n", pad));
        }

        if self.suppressed_diagnostics > 0 {
            output.push_str(&format!(
                "note: {} more diagnostics were not recorded\n",
                self.suppressed_diagnostics
            ));
        }

        let failed = self.failed_lines();
        if failed > 0 {
            output.push_str(&format!(
                "error: {} line{} failed in {}\n",
                failed,
                if failed == 1 { "" } else { "s" },
                self.source
            ));
        }

        output
    }
}
