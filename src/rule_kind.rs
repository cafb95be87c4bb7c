//! Rule kind definitions.

use std::fmt;

/// Prefix marking an exception rule in list text.
pub const EXCEPTION_PREFIX: char = '!';

/// Wildcard label placeholder.
pub const WILDCARD_LABEL: &str = "*";

/// RuleKind determines how a rule's labels are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleKind {
    /// Every label must match literally
    #[default]
    Exact,
    /// The leftmost label matches any single label
    Wildcard,
    /// Literal match that gives one label back to the registrable side
    Exception,
}

impl RuleKind {
    /// Detect the kind of a rule from its list text.
    pub fn detect(text: &str) -> Self {
        if text.starts_with(EXCEPTION_PREFIX) {
            RuleKind::Exception
        } else if text == WILDCARD_LABEL || text.starts_with("*.") {
            RuleKind::Wildcard
        } else {
            RuleKind::Exact
        }
    }

    /// Parse a kind from its name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exact" | "normal" => Some(RuleKind::Exact),
            "wildcard" => Some(RuleKind::Wildcard),
            "exception" => Some(RuleKind::Exception),
            _ => None,
        }
    }

    /// Get the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Exact => "exact",
            RuleKind::Wildcard => "wildcard",
            RuleKind::Exception => "exception",
        }
    }

    /// Ordering used to break ties between rules of equal span.
    ///
    /// Lower wins.
    pub(crate) fn tie_rank(&self) -> u8 {
        match self {
            RuleKind::Exception => 0,
            RuleKind::Exact => 1,
            RuleKind::Wildcard => 2,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
