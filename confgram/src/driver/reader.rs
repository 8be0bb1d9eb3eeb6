//! Logical line assembly
//!
//! A physical line ending in a backslash is joined with the next physical
//! line, with the backslash removed. Line endings (`\n` or `\r\n`) are never
//! part of the returned text. Bytes that are not valid UTF-8 are replaced
//! with U+FFFD and the line is flagged; they never end the read.

use super::error::ParseError;
use std::borrow::Cow;
use std::io::BufRead;

/// One statement after continuation joining
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Joined text without continuation backslashes or line endings
    pub text: String,
    /// 1-based logical line number
    pub number: usize,
    /// 1-based physical line where this logical line starts
    pub physical_line: usize,
    /// The last physical line still asked for continuation when input ended
    pub continued_to_eof: bool,
    /// At least one physical line contained invalid UTF-8
    pub lossy: bool,
}

/// Reads logical lines from any buffered source
pub struct LogicalLineReader<R> {
    reader: R,
    buffer: Vec<u8>,
    physical_line: usize,
    logical_line: usize,
    finished: bool,
}

impl<R: BufRead> LogicalLineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            physical_line: 0,
            logical_line: 0,
            finished: false,
        }
    }

    /// Physical lines consumed so far
    pub fn physical_lines_read(&self) -> usize {
        self.physical_line
    }

    /// Next logical line, or `None` at end of input.
    ///
    /// A read failure ends the reader; later calls return `None`.
    pub fn read_logical_line(&mut self) -> Result<Option<LogicalLine>, ParseError> {
        if self.finished {
            return Ok(None);
        }

        let mut text = String::new();
        let mut start: Option<usize> = None;
        let mut lossy = false;

        loop {
            self.buffer.clear();
            let read = match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(read) => read,
                Err(error) => {
                    self.finished = true;
                    return Err(ParseError::from_read_error(&error, self.physical_line));
                }
            };

            if read == 0 {
                self.finished = true;
                // End of input is only a line boundary if a continuation is pending
                return Ok(start.map(|physical_line| self.emit(text, physical_line, true, lossy)));
            }

            self.physical_line += 1;
            let physical_line = *start.get_or_insert(self.physical_line);

            let continues = {
                let decoded = String::from_utf8_lossy(&self.buffer);
                lossy |= matches!(decoded, Cow::Owned(_));

                let content = strip_line_ending(&decoded);
                match content.strip_suffix('\\') {
                    Some(body) => {
                        text.push_str(body);
                        true
                    }
                    None => {
                        text.push_str(content);
                        false
                    }
                }
            };

            if !continues {
                return Ok(Some(self.emit(text, physical_line, false, lossy)));
            }
        }
    }

    fn emit(
        &mut self,
        text: String,
        physical_line: usize,
        continued_to_eof: bool,
        lossy: bool,
    ) -> LogicalLine {
        self.logical_line += 1;
        LogicalLine {
            text,
            number: self.logical_line,
            physical_line,
            continued_to_eof,
            lossy,
        }
    }
}

impl<R: BufRead> Iterator for LogicalLineReader<R> {
    type Item = Result<LogicalLine, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_logical_line().transpose()
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
