//! RuleSet storage and rule lookup.

mod config;
mod parser;

pub use config::{DefaultRule, FindOptions, ListConfig};
pub use parser::ListParser;

use ahash::AHashMap;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::normalize;
use crate::rule::Rule;
use crate::rule_kind::WILDCARD_LABEL;
use crate::Result;

/// RuleSet is an immutable-once-shared collection of suffix rules.
///
/// Rules are indexed by their rightmost label, so a lookup only inspects
/// the rules that share the name's top-level label (plus any bare `*`
/// rule). Build a set with [`RuleSet::add`] or one of the loaders, then
/// share it behind an `Arc`; replace it wholesale rather than mutating it.
///
/// Winner selection when several rules match:
/// 1. An exception rule (the one with the fewest labels if several)
/// 2. Otherwise the rule with the most labels
/// 3. On equal length, an exact rule over a wildcard rule
/// 4. The default rule when nothing matches
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Rules in insertion order
    rules: Vec<Rule>,
    /// Rightmost label -> positions in `rules`
    index: AHashMap<String, Vec<usize>>,
    /// Rule text -> position in `rules`
    by_value: AHashMap<String, usize>,
    /// Fallback when no listed rule matches
    default_rule: Rule,
}

impl RuleSet {
    /// Create an empty rule set with the implicit `*` default rule.
    pub fn new() -> Self {
        Self::with_default_rule(Rule::default_rule())
    }

    /// Create an empty rule set with a custom default rule.
    pub fn with_default_rule(default_rule: Rule) -> Self {
        Self {
            rules: Vec::new(),
            index: AHashMap::new(),
            by_value: AHashMap::new(),
            default_rule,
        }
    }

    /// Create a rule set from rules, in order.
    pub fn from_rules<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        let mut ruleset = Self::new();
        for rule in rules {
            ruleset.add(rule);
        }
        ruleset
    }

    /// Parse a rule set from list text.
    pub fn parse(text: &str, config: &ListConfig) -> Result<Self> {
        ListParser::parse(text.as_bytes(), config)
    }

    /// Parse a rule set from a reader of list text.
    pub fn from_reader<R: Read>(reader: R, config: &ListConfig) -> Result<Self> {
        ListParser::parse(reader, config)
    }

    /// Load a rule set from a list file.
    ///
    /// Files ending in `.gz` are decompressed on the fly.
    pub fn from_path(path: &Path, config: &ListConfig) -> Result<Self> {
        let file = File::open(path)?;
        let ruleset = if path.extension().map_or(false, |ext| ext == "gz") {
            ListParser::parse(GzDecoder::new(file), config)?
        } else {
            ListParser::parse(file, config)?
        };

        log::debug!("Loaded {} rules from {:?}", ruleset.len(), path);
        Ok(ruleset)
    }

    /// Add a rule. A rule with the same text replaces the earlier one.
    pub fn add(&mut self, rule: Rule) {
        let value = rule.value();
        if let Some(&pos) = self.by_value.get(&value) {
            log::debug!("Replacing duplicate rule: {}", value);
            self.rules[pos] = rule;
            return;
        }

        let pos = self.rules.len();
        self.index
            .entry(rule.top_label().to_string())
            .or_default()
            .push(pos);
        self.by_value.insert(value, pos);
        self.rules.push(rule);
    }

    /// Remove all rules. The default rule is kept.
    pub fn clear(&mut self) {
        self.rules.clear();
        self.index.clear();
        self.by_value.clear();
    }

    /// Get the number of listed rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules are listed.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Check whether a rule with the same text is listed.
    pub fn contains(&self, rule: &Rule) -> bool {
        self.get(&rule.value()) == Some(rule)
    }

    /// Look up a rule by its list text.
    pub fn get(&self, value: &str) -> Option<&Rule> {
        self.by_value.get(value).map(|&pos| &self.rules[pos])
    }

    /// Get the default rule.
    pub fn default_rule(&self) -> &Rule {
        &self.default_rule
    }

    /// Positions of the rules that could match a name with these labels.
    fn candidates(&self, labels: &[&str]) -> impl Iterator<Item = usize> + '_ {
        let top = labels.last().copied().unwrap_or_default();
        let by_top = self.index.get(top).into_iter().flatten();
        let bare_wildcard = if top == WILDCARD_LABEL {
            None
        } else {
            self.index.get(WILDCARD_LABEL)
        };
        by_top.chain(bare_wildcard.into_iter().flatten()).copied()
    }

    /// Find every listed rule matching a normalized name, in insertion order.
    pub fn select(&self, name: &str, ignore_private: bool) -> Vec<&Rule> {
        let labels = normalize::labels(name);
        let mut positions: Vec<usize> = self
            .candidates(&labels)
            .filter(|&pos| {
                let rule = &self.rules[pos];
                !(ignore_private && rule.is_private()) && rule.matches(&labels)
            })
            .collect();
        positions.sort_unstable();
        positions.into_iter().map(|pos| &self.rules[pos]).collect()
    }

    /// Find the rule that decides the public suffix of a normalized name.
    ///
    /// Falls back to the default rule selected by `options` when no listed
    /// rule matches; returns `None` only if that fallback is disabled.
    pub fn find<'a>(&'a self, name: &str, options: &'a FindOptions) -> Option<&'a Rule> {
        let labels = normalize::labels(name);

        let mut best: Option<&Rule> = None;
        for pos in self.candidates(&labels) {
            let rule = &self.rules[pos];
            if options.ignore_private && rule.is_private() {
                continue;
            }
            if !rule.matches(&labels) {
                continue;
            }
            best = match best {
                Some(current) if !rule.outranks(current) => Some(current),
                _ => Some(rule),
            };
        }

        best.or(match &options.default_rule {
            DefaultRule::Implicit => Some(&self.default_rule),
            DefaultRule::Custom(rule) => Some(rule),
            DefaultRule::Disabled => None,
        })
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for RuleSet {}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        for rule in iter {
            self.add(rule);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ruleset(rules: &[&str]) -> RuleSet {
        RuleSet::from_rules(rules.iter().map(|r| Rule::parse(r).unwrap()))
    }

    fn find_value(set: &RuleSet, name: &str) -> Option<String> {
        set.find(name, &FindOptions::default()).map(|r| r.value())
    }

    #[test]
    fn test_new_ruleset() {
        let set = RuleSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.default_rule(), &Rule::default_rule());
    }

    #[test]
    fn test_add_and_dedup() {
        let mut set = ruleset(&["com", "co.uk"]);
        assert_eq!(set.len(), 2);

        set.add(Rule::parse_private("com").unwrap());
        assert_eq!(set.len(), 2);
        assert!(set.get("com").unwrap().is_private());

        assert!(set.contains(&Rule::parse_private("com").unwrap()));
        assert!(!set.contains(&Rule::parse("com").unwrap()));
        assert!(!set.contains(&Rule::parse("org").unwrap()));
    }

    #[test]
    fn test_clear() {
        let mut set = ruleset(&["com", "co.uk"]);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(find_value(&set, "example.com"), Some("*".to_string()));
    }

    #[test]
    fn test_longest_match_wins() {
        let set = ruleset(&["jp", "kawasaki.jp", "city.kawasaki.jp"]);
        assert_eq!(find_value(&set, "a.city.kawasaki.jp"), Some("city.kawasaki.jp".to_string()));
        assert_eq!(find_value(&set, "a.kawasaki.jp"), Some("kawasaki.jp".to_string()));
        assert_eq!(find_value(&set, "a.jp"), Some("jp".to_string()));
    }

    #[test]
    fn test_order_does_not_matter() {
        let set = ruleset(&["city.kawasaki.jp", "jp", "*.kawasaki.jp"]);
        assert_eq!(find_value(&set, "a.city.kawasaki.jp"), Some("city.kawasaki.jp".to_string()));
        assert_eq!(find_value(&set, "a.b.kawasaki.jp"), Some("*.kawasaki.jp".to_string()));
    }

    #[test]
    fn test_exact_beats_wildcard_of_equal_length() {
        let set = ruleset(&["*.ck", "foo.ck"]);
        assert_eq!(find_value(&set, "x.foo.ck"), Some("foo.ck".to_string()));

        let set = ruleset(&["foo.ck", "*.ck"]);
        assert_eq!(find_value(&set, "x.foo.ck"), Some("foo.ck".to_string()));
        assert_eq!(find_value(&set, "x.bar.ck"), Some("*.ck".to_string()));
    }

    #[test]
    fn test_exception_wins() {
        let set = ruleset(&["*.ck", "!www.ck"]);
        assert_eq!(find_value(&set, "www.ck"), Some("!www.ck".to_string()));
        assert_eq!(find_value(&set, "a.www.ck"), Some("!www.ck".to_string()));
        assert_eq!(find_value(&set, "foo.ck"), Some("*.ck".to_string()));

        // Even over a longer rule
        let set = ruleset(&["*.kawasaki.jp", "!city.kawasaki.jp", "a.city.kawasaki.jp"]);
        assert_eq!(
            find_value(&set, "b.a.city.kawasaki.jp"),
            Some("!city.kawasaki.jp".to_string())
        );
    }

    #[test]
    fn test_multiple_exceptions_fewest_labels_wins() {
        let set = ruleset(&["!a.b.ck", "!b.ck"]);
        assert_eq!(find_value(&set, "x.a.b.ck"), Some("!b.ck".to_string()));
    }

    #[test]
    fn test_default_rule_fallback() {
        let set = ruleset(&["com"]);
        assert_eq!(find_value(&set, "example.unknown"), Some("*".to_string()));

        let custom = Rule::parse("*.unknown").unwrap();
        let opts = FindOptions::new().default_rule(custom.clone());
        assert_eq!(set.find("example.unknown", &opts), Some(&custom));

        let opts = FindOptions::new().without_default_rule();
        assert_eq!(set.find("example.unknown", &opts), None);
        assert!(set.find("example.com", &opts).is_some());

        let set = RuleSet::with_default_rule(custom.clone());
        assert_eq!(set.find("example.unknown", &FindOptions::default()), Some(&custom));
    }

    #[test]
    fn test_default_rule_never_beats_listed_rule() {
        let set = ruleset(&["com"]);
        assert_eq!(find_value(&set, "com"), Some("com".to_string()));
        assert_eq!(find_value(&set, "google.com"), Some("com".to_string()));
    }

    #[test]
    fn test_bare_wildcard_rule_is_consulted() {
        let set = ruleset(&["*", "com"]);
        assert_eq!(find_value(&set, "example.org"), Some("*".to_string()));
        assert_eq!(find_value(&set, "example.com"), Some("com".to_string()));
        assert_eq!(set.select("example.com", false).len(), 2);
    }

    #[test]
    fn test_ignore_private() {
        let mut set = ruleset(&["com"]);
        set.add(Rule::parse_private("blogspot.com").unwrap());

        assert_eq!(find_value(&set, "foo.blogspot.com"), Some("blogspot.com".to_string()));

        let opts = FindOptions::new().ignore_private(true);
        assert_eq!(
            set.find("foo.blogspot.com", &opts).map(|r| r.value()),
            Some("com".to_string())
        );
    }

    #[test]
    fn test_select() {
        let set = ruleset(&["uk", "co.uk", "com", "*.uk"]);
        let values: Vec<String> = set
            .select("example.co.uk", false)
            .into_iter()
            .map(|r| r.value())
            .collect();
        assert_eq!(values, vec!["uk", "co.uk", "*.uk"]);
        assert!(set.select("example.org", false).is_empty());
    }

    #[test]
    fn test_equality_and_iteration() {
        let a = ruleset(&["com", "co.uk"]);
        let b = ruleset(&["com", "co.uk"]);
        let c = ruleset(&["co.uk", "com"]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let values: Vec<String> = (&a).into_iter().map(|r| r.value()).collect();
        assert_eq!(values, vec!["com", "co.uk"]);

        let mut d = RuleSet::new();
        d.extend(a.iter().cloned());
        assert_eq!(a, d);
    }

    #[test]
    fn test_shared_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let set = Arc::new(ruleset(&["com", "co.uk", "*.ck", "!www.ck"]));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let set = Arc::clone(&set);
                thread::spawn(move || {
                    let opts = FindOptions::default();
                    for _ in 0..100 {
                        assert_eq!(set.find("www.ck", &opts).unwrap().value(), "!www.ck");
                        assert_eq!(set.find("a.co.uk", &opts).unwrap().value(), "co.uk");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
