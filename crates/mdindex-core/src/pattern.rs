//! Ignore patterns: literal strings or regular expressions.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A pattern used to ignore headings or blocks.
///
/// In configuration a bare string is a literal and `{ regex = "..." }` is a
/// regular expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PatternDef", into = "PatternDef")]
pub enum Pattern {
    /// Literal text.
    Literal(String),
    /// Compiled regular expression.
    Regex(Regex),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PatternDef {
    Literal(String),
    Regex { regex: String },
}

impl TryFrom<PatternDef> for Pattern {
    type Error = regex::Error;

    fn try_from(def: PatternDef) -> Result<Self, Self::Error> {
        match def {
            PatternDef::Literal(text) => Ok(Self::Literal(text)),
            PatternDef::Regex { regex } => Self::regex(&regex),
        }
    }
}

impl From<Pattern> for PatternDef {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Literal(text) => Self::Literal(text),
            Pattern::Regex(re) => Self::Regex {
                regex: re.as_str().to_string(),
            },
        }
    }
}

impl Pattern {
    /// Create a literal pattern.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a regular expression pattern.
    pub fn regex(source: &str) -> Result<Self, regex::Error> {
        Ok(Self::Regex(Regex::new(source)?))
    }

    /// Block-syntax match: literals match as a prefix.
    pub fn matches_prefix(&self, text: &str) -> bool {
        match self {
            Self::Literal(prefix) => text.starts_with(prefix.as_str()),
            Self::Regex(re) => re.is_match(text),
        }
    }

    /// Heading match: literals compare against the lowercased text.
    pub fn matches_lowercase(&self, text: &str) -> bool {
        match self {
            Self::Literal(expected) => *expected == text.to_lowercase(),
            Self::Regex(re) => re.is_match(text),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
