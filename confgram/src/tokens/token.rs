use crate::config::compile_time::lexical::UNKNOWN_TOKEN_TYPE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type name of the built-in decimal integer detector
pub const NUMBER: &str = "NUMBER";
/// Type name of the built-in "anything that is not a decimal integer" detector
pub const STRING: &str = "STRING";
/// Type name of the built-in float detector
pub const FLOAT: &str = "FLOAT";

/// Lexical category of a token: either a literal keyword or a pattern class
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenType(String);

impl TokenType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Type assigned to text that is neither a keyword nor matched by a detector
    pub fn unknown() -> Self {
        Self(UNKNOWN_TOKEN_TYPE.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_TOKEN_TYPE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TokenType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for TokenType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TokenType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "<unknown>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One whitespace-delimited unit of a logical line, with its classification.
///
/// The raw text is kept exactly as it appeared on the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    token_type: TokenType,
    text: String,
}

impl Token {
    pub fn new(token_type: TokenType, text: impl Into<String>) -> Self {
        Self {
            token_type,
            text: text.into(),
        }
    }

    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_unknown(&self) -> bool {
        self.token_type.is_unknown()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.token_type, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type() {
        let unknown = TokenType::unknown();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.as_str(), "");
        assert!(!TokenType::from(STRING).is_unknown());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenType::from(STRING), "127.0.0.1");
        assert_eq!(token.to_string(), "STRING(127.0.0.1)");

        let unknown = Token::new(TokenType::unknown(), "???");
        assert_eq!(unknown.to_string(), "<unknown>(???)");
    }

    #[test]
    fn test_token_type_compares_with_str() {
        let token_type = TokenType::from("listen");
        assert_eq!(token_type, "listen");
        assert_ne!(token_type, "on");
    }

    #[test]
    fn test_token_serializes_type_as_plain_string() {
        let token = Token::new(TokenType::from(NUMBER), "8080");
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["token_type"], "NUMBER");
        assert_eq!(json["text"], "8080");
    }
}
