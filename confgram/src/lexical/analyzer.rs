//! Line tokenizer with keyword and detector classification

use super::detectors::{self, Detector};
use crate::logging::codes;
use crate::tokens::{Token, TokenType, FLOAT, NUMBER, STRING};
use crate::{log_debug, log_warning};
use std::collections::HashSet;

/// Scanner state while walking a logical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between tokens; delimiters are swallowed
    SkipWhitespace,
    /// Accumulating characters of the current token
    InToken,
    /// Discards the rest of the line. Reserved; nothing enters this state yet.
    #[allow(dead_code)]
    SkipComment,
}

fn is_delimiter(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Tokenizer holding the registered vocabulary.
///
/// Classification of a finished word checks the keyword set first, then each
/// detector in registration order. Text matching neither gets
/// [`TokenType::unknown`].
#[derive(Debug, Default)]
pub struct Lexer {
    keywords: HashSet<String>,
    detectors: Vec<Detector>,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexer with the NUMBER, STRING and FLOAT detectors registered, in that order
    pub fn with_builtin_detectors() -> Self {
        let mut lexer = Self::new();
        lexer.register_detector(NUMBER, detectors::is_number);
        lexer.register_detector(STRING, detectors::is_string);
        lexer.register_detector(FLOAT, detectors::is_float);
        lexer
    }

    /// Register an exact-match keyword. Its token type is the keyword itself.
    ///
    /// Returns `false` if the keyword was already registered; the vocabulary
    /// is left unchanged in that case.
    pub fn register_keyword(&mut self, keyword: impl Into<String>) -> bool {
        let keyword = keyword.into();
        if self.keywords.contains(&keyword) {
            log_warning!(codes::lexical::DUPLICATE_KEYWORD, "Keyword already registered",
                "keyword" => keyword.as_str()
            );
            return false;
        }

        log_debug!("Registered keyword", "keyword" => keyword.as_str());
        self.keywords.insert(keyword);
        true
    }

    /// Register a pattern detector after all previously registered ones.
    ///
    /// Returns `false` if a detector with the same type name exists; the first
    /// registration is kept.
    pub fn register_detector<F>(&mut self, token_type: impl Into<TokenType>, predicate: F) -> bool
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let token_type = token_type.into();
        if self
            .detectors
            .iter()
            .any(|detector| detector.token_type() == &token_type)
        {
            log_warning!(codes::lexical::DUPLICATE_DETECTOR, "Detector already registered",
                "token_type" => &token_type
            );
            return false;
        }

        log_debug!("Registered detector",
            "token_type" => &token_type,
            "position" => self.detectors.len()
        );
        self.detectors.push(Detector::new(token_type, predicate));
        true
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.keywords.contains(text)
    }

    /// Detector type names in the order they are consulted
    pub fn detector_names(&self) -> Vec<&TokenType> {
        self.detectors.iter().map(Detector::token_type).collect()
    }

    /// Registered keywords, sorted
    pub fn keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.keywords.iter().map(String::as_str).collect();
        keywords.sort_unstable();
        keywords
    }

    /// Classify one word of raw text
    pub fn classify(&self, text: &str) -> TokenType {
        if self.is_keyword(text) {
            return TokenType::from(text);
        }

        self.detectors
            .iter()
            .find(|detector| detector.matches(text))
            .map(|detector| detector.token_type().clone())
            .unwrap_or_else(TokenType::unknown)
    }

    /// Split a logical line on spaces and tabs and classify each word.
    ///
    /// Never fails; a blank line yields no tokens.
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut buffer = String::new();
        let mut state = ScanState::SkipWhitespace;

        for ch in line.chars() {
            match state {
                ScanState::SkipComment => {}
                ScanState::SkipWhitespace => {
                    if !is_delimiter(ch) {
                        buffer.push(ch);
                        state = ScanState::InToken;
                    }
                }
                ScanState::InToken => {
                    if is_delimiter(ch) {
                        tokens.push(self.finish_token(&mut buffer));
                        state = ScanState::SkipWhitespace;
                    } else {
                        buffer.push(ch);
                    }
                }
            }
        }

        if state == ScanState::InToken {
            tokens.push(self.finish_token(&mut buffer));
        }

        tokens
    }

    fn finish_token(&self, buffer: &mut String) -> Token {
        let text = std::mem::take(buffer);
        Token::new(self.classify(&text), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_lexer() -> Lexer {
        let mut lexer = Lexer::new();
        lexer.register_keyword("listen");
        lexer.register_keyword("on");
        lexer.register_detector(STRING, detectors::is_string);
        lexer
    }

    fn types(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.token_type().as_str()).collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::text).collect()
    }

    #[test]
    fn test_blank_lines_yield_no_tokens() {
        let lexer = Lexer::with_builtin_detectors();
        for line in ["", " ", "\t", "  \t  \t ", "\t\t"] {
            assert!(lexer.tokenize(line).is_empty(), "{:?}", line);
        }
    }

    #[test]
    fn test_spaces_and_tabs_are_interchangeable() {
        let lexer = scenario_lexer();
        let spaced = lexer.tokenize("listen on 127.0.0.1");
        let tabbed = lexer.tokenize("\tlisten\t\ton \t 127.0.0.1\t");

        assert_eq!(spaced, tabbed);
        assert_eq!(texts(&spaced), vec!["listen", "on", "127.0.0.1"]);
    }

    #[test]
    fn test_keyword_beats_detectors() {
        let mut lexer = Lexer::new();
        lexer.register_detector(STRING, detectors::is_string);
        lexer.register_detector("ANY", |_: &str| true);
        lexer.register_keyword("listen");

        let tokens = lexer.tokenize("listen");
        assert_eq!(types(&tokens), vec!["listen"]);
    }

    #[test]
    fn test_numeric_keyword_beats_number_detector() {
        let mut lexer = Lexer::with_builtin_detectors();
        lexer.register_keyword("80");

        assert_eq!(lexer.classify("80"), TokenType::from("80"));
        assert_eq!(lexer.classify("81"), TokenType::from(NUMBER));
    }

    #[test]
    fn test_first_registered_detector_wins() {
        let mut lexer = Lexer::new();
        lexer.register_detector("FIRST", |text: &str| text.starts_with('a'));
        lexer.register_detector("SECOND", |_: &str| true);

        assert_eq!(lexer.classify("abc"), TokenType::from("FIRST"));
        assert_eq!(lexer.classify("xyz"), TokenType::from("SECOND"));

        let mut reversed = Lexer::new();
        reversed.register_detector("SECOND", |_: &str| true);
        reversed.register_detector("FIRST", |text: &str| text.starts_with('a'));
        assert_eq!(reversed.classify("abc"), TokenType::from("SECOND"));
    }

    #[test]
    fn test_unmatched_text_is_unknown() {
        let mut lexer = Lexer::new();
        lexer.register_keyword("listen");

        let tokens = lexer.tokenize("listen 8080");
        assert_eq!(tokens.len(), 2);
        assert!(!tokens[0].is_unknown());
        assert!(tokens[1].is_unknown());
        assert_eq!(tokens[1].text(), "8080");
    }

    #[test]
    fn test_builtin_detectors() {
        let lexer = Lexer::with_builtin_detectors();
        let tokens = lexer.tokenize("8080 127.0.0.1 1.5 -3");

        assert_eq!(types(&tokens), vec![NUMBER, STRING, STRING, NUMBER]);
        assert_eq!(
            lexer.detector_names(),
            vec![
                &TokenType::from(NUMBER),
                &TokenType::from(STRING),
                &TokenType::from(FLOAT)
            ]
        );
    }

    #[test]
    fn test_scenario_classification() {
        let lexer = scenario_lexer();

        let tokens = lexer.tokenize("listen on 127.0.0.1");
        assert_eq!(types(&tokens), vec!["listen", "on", STRING]);

        // Not STRING: only the STRING detector is registered and 8080 is an integer
        let tokens = lexer.tokenize("listen on 8080");
        assert!(tokens[2].is_unknown());
    }

    #[test]
    fn test_duplicate_keyword_is_ignored() {
        let mut once = Lexer::new();
        once.register_keyword("on");

        let mut twice = Lexer::new();
        assert!(twice.register_keyword("on"));
        assert!(!twice.register_keyword("on"));

        assert_eq!(once.keywords(), twice.keywords());
        assert_eq!(once.tokenize("on off"), twice.tokenize("on off"));
    }

    #[test]
    fn test_duplicate_detector_keeps_first() {
        let mut lexer = Lexer::new();
        assert!(lexer.register_detector("WORD", |text: &str| text == "a"));
        assert!(!lexer.register_detector("WORD", |_: &str| true));

        assert_eq!(lexer.detector_names().len(), 1);
        assert_eq!(lexer.classify("a"), TokenType::from("WORD"));
        assert!(lexer.classify("b").is_unknown());
    }

    #[test]
    fn test_raw_text_is_preserved() {
        let lexer = Lexer::with_builtin_detectors();
        let tokens = lexer.tokenize("match => \"quoted text\"");
        assert_eq!(texts(&tokens), vec!["match", "=>", "\"quoted", "text\""]);
    }

    #[test]
    fn test_non_ascii_text() {
        let lexer = Lexer::with_builtin_detectors();
        let tokens = lexer.tokenize("héllo  wörld");
        assert_eq!(texts(&tokens), vec!["héllo", "wörld"]);
        assert_eq!(types(&tokens), vec![STRING, STRING]);
    }
}
