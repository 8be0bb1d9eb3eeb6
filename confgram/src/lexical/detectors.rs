//! Built-in pattern detectors
//!
//! A detector is a named predicate over the raw text of a token. The lexer
//! consults detectors in registration order once keyword lookup has failed.

use crate::tokens::TokenType;
use std::fmt;

/// Predicate deciding whether raw token text belongs to a pattern class
pub type DetectorFn = dyn Fn(&str) -> bool + Send + Sync;

/// A token type paired with the predicate that recognizes it
pub struct Detector {
    token_type: TokenType,
    predicate: Box<DetectorFn>,
}

impl Detector {
    pub fn new<F>(token_type: impl Into<TokenType>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            token_type: token_type.into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    pub fn matches(&self, text: &str) -> bool {
        (self.predicate)(text)
    }
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Decimal integer with an optional sign, within 64-bit range
pub fn is_number(text: &str) -> bool {
    text.parse::<i64>().is_ok()
}

/// Anything that is not a decimal integer
pub fn is_string(text: &str) -> bool {
    !is_number(text)
}

/// Decimal integer that also contains a dot.
///
/// No input satisfies both conditions, so this never matches. It is kept as
/// is; callers wanting real float literals should register their own detector.
pub fn is_float(text: &str) -> bool {
    is_number(text) && text.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_number() {
        assert!(is_number("8080"));
        assert!(is_number("-42"));
        assert!(is_number("+7"));
        assert!(is_number("0"));
        assert!(!is_number("127.0.0.1"));
        assert!(!is_number("12a"));
        assert!(!is_number("99999999999999999999"));
        assert!(!is_number(""));
    }

    #[test]
    fn test_is_string_is_complement_of_number() {
        for text in ["listen", "8080", "1.5", "=>", "-3", ""] {
            assert_eq!(is_string(text), !is_number(text), "{}", text);
        }
    }

    #[test]
    fn test_is_float_never_matches() {
        for text in ["1.5", "0.0", "3", "-2.25", ".", "1."] {
            assert!(!is_float(text), "{}", text);
        }
    }

    #[test]
    fn test_detector_wraps_closure() {
        let detector = Detector::new("HEX", |text: &str| text.starts_with("0x"));
        assert_eq!(detector.token_type(), &TokenType::from("HEX"));
        assert!(detector.matches("0xff"));
        assert!(!detector.matches("ff"));
    }
}
