//! Matching expressions and their compiled form.
//!
//! An [`Expression`] is what callers register against: a wildcard string or a
//! ready-made [`Regex`]. [`validate`] turns it into a [`Pattern`], whose
//! [`key`](Pattern::key) is the canonical source text used to index the
//! registry.
//!
//! Wildcard conversion is purely syntactic. Every `*` becomes `(.*)` and the
//! remaining text is compiled as-is, so regex metacharacters in a wildcard
//! string keep their regex meaning:
//!
//! ```
//! use match_emitter_core::validate;
//!
//! let pattern = validate("c*lo*").unwrap();
//! assert_eq!(pattern.key(), "c(.*)lo(.*)");
//! assert!(pattern.is_match("colors"));
//!
//! // `.` is not escaped
//! assert!(validate("a.c").unwrap().is_match("abc"));
//! ```

use crate::error::EmitterError;
use regex::Regex;
use std::fmt;

/// Token replaced by [`WILDCARD_REPLACEMENT`] in wildcard strings.
pub const WILDCARD: char = '*';

/// Regex text substituted for every [`WILDCARD`]: any text, greedy, may be empty.
pub const WILDCARD_REPLACEMENT: &str = "(.*)";

/// A matching expression supplied by a caller.
#[derive(Debug, Clone)]
pub enum Expression {
    /// A literal name, optionally containing `*` wildcards.
    Wildcard(String),
    /// A regular expression used verbatim.
    Regex(Regex),
}

impl Expression {
    /// The expression as the caller wrote it.
    pub fn as_str(&self) -> &str {
        match self {
            Expression::Wildcard(s) => s,
            Expression::Regex(r) => r.as_str(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Wildcard(s) => f.write_str(s),
            Expression::Regex(r) => write!(f, "/{}/", r.as_str()),
        }
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::Wildcard(s.to_owned())
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Expression::Wildcard(s)
    }
}

impl From<&String> for Expression {
    fn from(s: &String) -> Self {
        Expression::Wildcard(s.clone())
    }
}

impl From<Regex> for Expression {
    fn from(r: Regex) -> Self {
        Expression::Regex(r)
    }
}

impl From<&Regex> for Expression {
    fn from(r: &Regex) -> Self {
        Expression::Regex(r.clone())
    }
}

/// A compiled expression.
///
/// Two patterns with the same [`key`](Pattern::key) are interchangeable; the
/// registry stores one slot per key.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Canonical source text of the compiled expression.
    pub fn key(&self) -> &str {
        self.regex.as_str()
    }

    /// Test the pattern against a literal event name.
    ///
    /// Search semantics: the pattern may match anywhere in `name`.
    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The underlying regular expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pattern {}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

/// Rewrite a wildcard string into regex source text.
pub fn wildcard_to_regex(wildcard: &str) -> String {
    wildcard
        .split(WILDCARD)
        .collect::<Vec<_>>()
        .join(WILDCARD_REPLACEMENT)
}

/// Compile an expression into a [`Pattern`].
///
/// # Errors
///
/// [`EmitterError::InvalidExpressionKind`] if a wildcard string does not
/// compile once converted.
pub fn validate(expression: impl Into<Expression>) -> Result<Pattern, EmitterError> {
    match expression.into() {
        Expression::Wildcard(wildcard) => {
            let source = wildcard_to_regex(&wildcard);
            Regex::new(&source)
                .map(Pattern::from)
                .map_err(|source| EmitterError::InvalidExpressionKind {
                    expression: wildcard,
                    source,
                })
        }
        Expression::Regex(regex) => Ok(Pattern::from(regex)),
    }
}
