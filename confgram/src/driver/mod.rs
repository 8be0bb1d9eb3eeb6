//! Parse driver
//!
//! [`Configuration`] owns a [`Lexer`] and a [`Grammar`] and runs a whole
//! source through them one logical line at a time. Unmatched or rejected
//! lines are recorded and scanning continues; only I/O failures abort.

pub mod error;
pub mod reader;
pub mod report;

use crate::config::compile_time::driver::MAX_LOGGED_LINE_LENGTH;
use crate::config::runtime::DriverPreferences;
use crate::grammar::{Grammar, MatchOutcome, Rule};
use crate::lexical::Lexer;
use crate::logging::{self, codes};
use crate::{log_error, log_info, log_success, log_warning};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::time::Instant;

pub use error::ParseError;
pub use reader::{LogicalLine, LogicalLineReader};
pub use report::{Diagnostic, DiagnosticKind, ParseReport};

/// Label used for sources parsed from memory
pub const STRING_SOURCE_LABEL: &str = "<string>";

/// Lexer, grammar and per-parse state.
///
/// Vocabulary and rules are expected to be complete before the first parse.
/// The line counter and success flag are reset at the start of every parse.
pub struct Configuration<C = ()> {
    lexer: Lexer,
    grammar: Grammar<C>,
    preferences: DriverPreferences,
    line_number: usize,
    success: bool,
}

impl<C> Configuration<C> {
    pub fn new(lexer: Lexer, grammar: Grammar<C>) -> Self {
        Self::with_preferences(lexer, grammar, DriverPreferences::default())
    }

    pub fn with_preferences(
        lexer: Lexer,
        grammar: Grammar<C>,
        preferences: DriverPreferences,
    ) -> Self {
        Self {
            lexer,
            grammar,
            preferences,
            line_number: 0,
            success: true,
        }
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn lexer_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    pub fn grammar(&self) -> &Grammar<C> {
        &self.grammar
    }

    pub fn grammar_mut(&mut self) -> &mut Grammar<C> {
        &mut self.grammar
    }

    pub fn preferences(&self) -> &DriverPreferences {
        &self.preferences
    }

    /// Logical line most recently processed by the current or last parse
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Success flag of the last parse; `false` after a fatal error
    pub fn last_success(&self) -> bool {
        self.success
    }

    /// Parse a file on disk
    pub fn parse_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        context: &mut C,
    ) -> Result<ParseReport, ParseError> {
        let path = path.as_ref();
        let label = path.display().to_string();

        logging::with_source_context(&label, || {
            let file = match Self::open_source(path, &label) {
                Ok(file) => file,
                Err(error) => {
                    self.reset();
                    return Err(self.fail(error));
                }
            };

            log_success!(codes::success::SOURCE_OPENED, "Opened source",
                "path" => label.as_str()
            );

            self.run(BufReader::new(file), &label, context)
        })
    }

    /// Parse an already-open stream; `label` names it in diagnostics and logs
    pub fn parse_reader<R: BufRead>(
        &mut self,
        reader: R,
        label: &str,
        context: &mut C,
    ) -> Result<ParseReport, ParseError> {
        logging::with_source_context(label, || self.run(reader, label, context))
    }

    /// Parse in-memory text
    pub fn parse_str(&mut self, source: &str, context: &mut C) -> Result<ParseReport, ParseError> {
        self.parse_reader(Cursor::new(source), STRING_SOURCE_LABEL, context)
    }

    fn open_source(path: &Path, label: &str) -> Result<File, ParseError> {
        if path.as_os_str().is_empty() || path.is_dir() {
            return Err(ParseError::InvalidPath {
                path: label.to_string(),
            });
        }

        File::open(path).map_err(|e| ParseError::from_open_error(&e, label))
    }

    fn reset(&mut self) {
        self.line_number = 0;
        self.success = true;
    }

    fn fail(&mut self, error: ParseError) -> ParseError {
        self.success = false;
        log_error!(error.error_code(), "Parse aborted",
            line = self.line_number,
            "error" => &error
        );
        error
    }

    fn run<R: BufRead>(
        &mut self,
        reader: R,
        label: &str,
        context: &mut C,
    ) -> Result<ParseReport, ParseError> {
        self.reset();
        let started = Instant::now();
        let mut report = ParseReport::new(label);
        let mut lines = LogicalLineReader::new(reader);

        log_info!("Parsing source", "source" => label, "rules" => self.grammar.len());

        loop {
            let line = match lines.read_logical_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(error) => return Err(self.fail(error)),
            };
            self.process_line(&line, &mut report, context);
        }

        report.physical_lines_read = lines.physical_lines_read();
        report.elapsed = started.elapsed();

        if self.success {
            log_success!(codes::success::PARSE_COMPLETE, "Parse complete",
                "lines" => report.lines_read,
                "matched" => report.matched_lines
            );
        } else {
            log_info!("Parse finished with failures",
                "failed" => report.failed_lines(),
                "lines" => report.lines_read
            );
        }

        Ok(report)
    }

    fn process_line(&mut self, line: &LogicalLine, report: &mut ParseReport, context: &mut C) {
        self.line_number = line.number;
        report.lines_read += 1;

        if line.continued_to_eof {
            report.continued_to_eof = true;
            log_warning!(codes::grammar::UNTERMINATED_CONTINUATION,
                "Line continuation reached end of input",
                line = line.number,
                "text" => truncate_for_log(&line.text)
            );
        }

        if line.lossy {
            report.lossy_lines += 1;
            log_warning!(codes::source::INVALID_ENCODING,
                "Invalid UTF-8 replaced with U+FFFD",
                line = line.number,
                "physical_line" => line.physical_line
            );
        }

        let tokens = self.lexer.tokenize(&line.text);
        if tokens.is_empty() {
            report.blank_lines += 1;
            return;
        }

        let diagnostic = match self.grammar.match_tokens(&tokens, context) {
            MatchOutcome::Matched { rule } => {
                report.matched_lines += 1;
                if self.preferences.log_matched_lines {
                    log_success!(codes::success::LINE_MATCHED, "Line matched",
                        "line" => line.number,
                        "rule" => self.rule_pattern(rule)
                    );
                }
                return;
            }
            MatchOutcome::NoMatch => {
                log_error!(codes::grammar::NO_MATCHING_RULE, "Line does not match any rule",
                    line = line.number,
                    "text" => truncate_for_log(&line.text),
                    "tokens" => tokens.len()
                );
                Diagnostic::no_matching_rule(line.number, line.physical_line, &line.text)
            }
            MatchOutcome::Rejected { rule, error } => {
                let pattern = self.rule_pattern(rule);
                log_error!(error.error_code(), "Rule handler rejected line",
                    line = line.number,
                    "rule" => pattern.as_str(),
                    "error" => &error,
                    "text" => truncate_for_log(&line.text)
                );
                Diagnostic::handler_rejected(
                    line.number,
                    line.physical_line,
                    &line.text,
                    pattern,
                    error.to_string(),
                )
            }
        };

        self.success = false;
        if report.record(diagnostic, self.preferences.collect_diagnostics) {
            log_warning!(codes::grammar::DIAGNOSTIC_LIMIT_REACHED,
                "Diagnostic limit reached; further failures are only counted",
                line = line.number
            );
        }
    }

    fn rule_pattern(&self, index: usize) -> String {
        self.grammar
            .rule(index)
            .map(Rule::pattern)
            .unwrap_or_default()
    }
}

fn truncate_for_log(text: &str) -> &str {
    if text.len() <= MAX_LOGGED_LINE_LENGTH {
        return text;
    }
    let mut end = MAX_LOGGED_LINE_LENGTH;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
