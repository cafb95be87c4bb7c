//! Suffix rules and the per-kind matching predicate.

use std::fmt;

use crate::error::{Error, Result};
use crate::normalize::{self, DOT};
use crate::rule_kind::{RuleKind, EXCEPTION_PREFIX, WILDCARD_LABEL};

/// Rule is a single public suffix pattern.
///
/// Labels are kept in text order, so the rightmost (top-level) label is
/// last. A wildcard rule keeps its `*` placeholder as the first label; an
/// exception rule does not keep the `!` marker.
///
/// # Examples
/// ```
/// use pubsuffix::{Rule, RuleKind};
///
/// let rule = Rule::parse("*.ck").unwrap();
/// assert_eq!(rule.kind(), RuleKind::Wildcard);
/// assert_eq!(rule.length(), 2);
/// assert!(rule.matches_name("foo.ck"));
/// assert!(!rule.matches_name("ck"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    labels: Vec<String>,
    kind: RuleKind,
    private: bool,
}

impl Rule {
    /// Parse a rule from its list text (`com`, `*.ck`, `!www.ck`).
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_section(text, false)
    }

    /// Parse a rule that belongs to the private section of the list.
    pub fn parse_private(text: &str) -> Result<Self> {
        Self::parse_with_section(text, true)
    }

    /// Parse a rule, flagging it as private or not.
    pub fn parse_with_section(text: &str, private: bool) -> Result<Self> {
        let text = text.trim().to_ascii_lowercase();
        let kind = RuleKind::detect(&text);
        let body = match kind {
            RuleKind::Exception => &text[EXCEPTION_PREFIX.len_utf8()..],
            _ => text.as_str(),
        };
        let labels = body.split(DOT).map(str::to_string).collect();
        Self::new(kind, labels, private)
    }

    /// Build a rule from its parts.
    ///
    /// For wildcard rules the first label must be `*`.
    pub fn new(kind: RuleKind, labels: Vec<String>, private: bool) -> Result<Self> {
        if labels.iter().any(|l| l.is_empty()) {
            return Err(Error::InvalidRule(format!(
                "empty label in `{}`",
                labels.join(".")
            )));
        }

        let literal_from = match kind {
            RuleKind::Wildcard => {
                if labels.first().map(String::as_str) != Some(WILDCARD_LABEL) {
                    return Err(Error::InvalidRule(format!(
                        "wildcard rule must start with `*`: {}",
                        labels.join(".")
                    )));
                }
                1
            }
            RuleKind::Exception if labels.len() < 2 => {
                return Err(Error::InvalidRule(format!(
                    "exception rule needs at least two labels: !{}",
                    labels.join(".")
                )));
            }
            _ => 0,
        };

        if labels[literal_from..].iter().any(|l| l.contains('*')) {
            return Err(Error::InvalidRule(format!(
                "`*` is only allowed as the leftmost label: {}",
                labels.join(".")
            )));
        }

        Ok(Self {
            labels,
            kind,
            private,
        })
    }

    /// The implicit rule used when nothing else matches: `*`.
    pub fn default_rule() -> Self {
        Self {
            labels: vec![WILDCARD_LABEL.to_string()],
            kind: RuleKind::Wildcard,
            private: false,
        }
    }

    /// Return a copy of this rule with the private flag set.
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Get the rule kind.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Get the rule labels, rightmost last.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Whether the rule comes from the private section of the list.
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Rightmost label, used to index the rule.
    pub fn top_label(&self) -> &str {
        self.labels.last().map(String::as_str).unwrap_or_default()
    }

    /// Number of labels compared when matching (the match span).
    pub fn length(&self) -> usize {
        self.labels.len()
    }

    /// Number of trailing labels claimed as public suffix.
    pub fn suffix_length(&self) -> usize {
        match self.kind {
            RuleKind::Exception => self.labels.len() - 1,
            RuleKind::Exact | RuleKind::Wildcard => self.labels.len(),
        }
    }

    /// Canonical list text of this rule.
    pub fn value(&self) -> String {
        let body = self.labels.join(".");
        match self.kind {
            RuleKind::Exception => format!("{}{}", EXCEPTION_PREFIX, body),
            RuleKind::Exact | RuleKind::Wildcard => body,
        }
    }

    /// Check whether the rule matches a name split into labels.
    pub fn matches(&self, name_labels: &[&str]) -> bool {
        let n = name_labels.len();
        let l = self.labels.len();
        if n < l {
            return false;
        }

        let compared = &name_labels[n - l..];
        self.labels
            .iter()
            .zip(compared)
            .enumerate()
            .all(|(i, (rule_label, label))| match self.kind {
                RuleKind::Wildcard if i == 0 => !label.is_empty(),
                _ => rule_label == label,
            })
    }

    /// Check whether the rule matches a normalized name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.matches(&normalize::labels(name))
    }

    /// Split a normalized name into the part left of the suffix and the
    /// suffix itself.
    ///
    /// Returns `(None, None)` if the rule does not match.
    pub fn decompose(&self, name: &str) -> (Option<String>, Option<String>) {
        let labels = normalize::labels(name);
        match self.split_point(&labels) {
            Some(at) => {
                let left = (at > 0).then(|| labels[..at].join("."));
                (left, Some(labels[at..].join(".")))
            }
            None => (None, None),
        }
    }

    /// Index of the first suffix label in `name_labels`.
    pub(crate) fn split_point(&self, name_labels: &[&str]) -> Option<usize> {
        if !self.matches(name_labels) {
            return None;
        }
        Some(name_labels.len() - self.suffix_length())
    }

    /// Whether this rule takes priority over `other` when both match.
    pub(crate) fn outranks(&self, other: &Rule) -> bool {
        match (self.kind, other.kind) {
            (RuleKind::Exception, RuleKind::Exception) => self.length() < other.length(),
            (RuleKind::Exception, _) => true,
            (_, RuleKind::Exception) => false,
            _ => {
                self.length() > other.length()
                    || (self.length() == other.length()
                        && self.kind.tie_rank() < other.kind.tie_rank())
            }
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::default_rule()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::str::FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(text: &str) -> Rule {
        Rule::parse(text).unwrap()
    }

    #[test]
    fn test_parse_kinds() {
        let r = rule("co.uk");
        assert_eq!(r.kind(), RuleKind::Exact);
        assert_eq!(r.labels(), &["co", "uk"]);
        assert_eq!(r.length(), 2);
        assert_eq!(r.top_label(), "uk");

        let r = rule("*.ck");
        assert_eq!(r.kind(), RuleKind::Wildcard);
        assert_eq!(r.labels(), &["*", "ck"]);
        assert_eq!(r.length(), 2);
        assert_eq!(r.suffix_length(), 2);

        let r = rule("!www.ck");
        assert_eq!(r.kind(), RuleKind::Exception);
        assert_eq!(r.labels(), &["www", "ck"]);
        assert_eq!(r.length(), 2);
        assert_eq!(r.suffix_length(), 1);
    }

    #[test]
    fn test_parse_lowercases() {
        assert_eq!(rule("CO.UK").value(), "co.uk");
        assert_eq!(rule(" !WWW.Ck ").value(), "!www.ck");
    }

    #[test]
    fn test_invalid_rules() {
        assert!(Rule::parse("").is_err());
        assert!(Rule::parse("!").is_err());
        assert!(Rule::parse("a..b").is_err());
        assert!(Rule::parse("foo.*.bar").is_err());
        assert!(Rule::parse("f*o.bar").is_err());
        assert!(Rule::parse("!*.ck").is_err());
        assert!(Rule::parse("!com").is_err());
        assert!(Rule::new(RuleKind::Wildcard, vec!["ck".to_string()], false).is_err());
    }

    #[test]
    fn test_value_and_display() {
        for text in ["com", "co.uk", "*.ck", "!www.ck", "*"] {
            assert_eq!(rule(text).value(), text);
            assert_eq!(rule(text).to_string(), text);
        }
    }

    #[test]
    fn test_private_flag() {
        assert!(!rule("com").is_private());
        assert!(Rule::parse_private("blogspot.com").unwrap().is_private());
        assert!(rule("com").with_private(true).is_private());
    }

    #[test]
    fn test_exact_matching() {
        let r = rule("co.uk");
        assert!(r.matches_name("co.uk"));
        assert!(r.matches_name("example.co.uk"));
        assert!(r.matches_name("www.example.co.uk"));
        assert!(!r.matches_name("uk"));
        assert!(!r.matches_name("example.uk"));
        assert!(!r.matches_name("example.xco.uk"));
    }

    #[test]
    fn test_wildcard_matching() {
        let r = rule("*.ck");
        assert!(r.matches_name("foo.ck"));
        assert!(r.matches_name("bar.foo.ck"));
        assert!(!r.matches_name("ck"));
        assert!(!r.matches(&["", "ck"]));
        assert!(!r.matches_name("foo.ch"));
    }

    #[test]
    fn test_exception_matching() {
        let r = rule("!www.ck");
        assert!(r.matches_name("www.ck"));
        assert!(r.matches_name("a.www.ck"));
        assert!(!r.matches_name("ww.ck"));
        assert!(!r.matches_name("ck"));
    }

    #[test]
    fn test_default_rule() {
        let r = Rule::default_rule();
        assert_eq!(r.value(), "*");
        assert_eq!(r.kind(), RuleKind::Wildcard);
        assert!(r.matches_name("anything"));
        assert!(r.matches_name("a.b.unknown"));
        assert_eq!(Rule::default(), r);
    }

    #[test]
    fn test_decompose() {
        assert_eq!(
            rule("com").decompose("www.google.com"),
            (Some("www.google".to_string()), Some("com".to_string()))
        );
        assert_eq!(
            rule("*.ck").decompose("bar.foo.ck"),
            (Some("bar".to_string()), Some("foo.ck".to_string()))
        );
        assert_eq!(
            rule("!www.ck").decompose("www.ck"),
            (Some("www".to_string()), Some("ck".to_string()))
        );
        assert_eq!(rule("com").decompose("com"), (None, Some("com".to_string())));
        assert_eq!(rule("com").decompose("example.org"), (None, None));
    }

    #[test]
    fn test_outranks() {
        let exact_long = rule("city.kawasaki.jp");
        let wildcard = rule("*.kawasaki.jp");
        let exact_short = rule("kawasaki.jp");
        let exception = rule("!city.kawasaki.jp");

        assert!(exact_long.outranks(&exact_short));
        assert!(!exact_short.outranks(&exact_long));
        assert!(exact_long.outranks(&wildcard));
        assert!(!wildcard.outranks(&exact_long));
        assert!(wildcard.outranks(&exact_short));
        assert!(exception.outranks(&exact_long));
        assert!(!exact_long.outranks(&exception));

        let exception_long = rule("!a.city.kawasaki.jp");
        assert!(exception.outranks(&exception_long));
    }
}
