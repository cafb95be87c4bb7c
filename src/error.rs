//! Error types for pubsuffix.

use std::fmt;
use thiserror::Error;

/// Reason a name was rejected as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// Empty after trimming and dropping the trailing dot
    Blank,
    /// Starts with a label separator
    LeadingSeparator,
    /// Still ends with a dot after the root dot was dropped
    TrailingSeparator,
    /// Two separators in a row
    EmptyLabel,
    /// Looks like a URL (contains `://`)
    SchemeLike,
    /// No rule matched, not even the default one
    NoMatchingRule,
}

impl InvalidReason {
    /// Get a short description of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::Blank => "name is blank",
            InvalidReason::LeadingSeparator => "name starts with a dot",
            InvalidReason::TrailingSeparator => "name ends with an empty label",
            InvalidReason::EmptyLabel => "name contains an empty label",
            InvalidReason::SchemeLike => "name contains a scheme, expected a bare host",
            InvalidReason::NoMatchingRule => "no rule matches the name",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for pubsuffix operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The name cannot be parsed as a domain
    #[error("invalid domain `{name}`: {reason}")]
    DomainInvalid { name: String, reason: InvalidReason },

    /// The name is a public suffix and has no registrable label
    #[error("domain `{0}` is not allowed according to registry policy")]
    DomainNotAllowed(String),

    /// Rule text cannot be turned into a rule
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid(name: &str, reason: InvalidReason) -> Self {
        Error::DomainInvalid {
            name: name.to_string(),
            reason,
        }
    }

    /// Whether this error belongs to the `DomainInvalid` class.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Error::DomainInvalid { .. })
    }

    /// Whether this error is a `DomainNotAllowed`.
    pub fn is_not_allowed(&self) -> bool {
        matches!(self, Error::DomainNotAllowed(_))
    }

    /// The invalid reason, if this is a `DomainInvalid` error.
    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            Error::DomainInvalid { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}

/// Result type alias for pubsuffix operations.
pub type Result<T> = std::result::Result<T, Error>;
