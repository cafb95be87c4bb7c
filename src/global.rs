//! Process-wide default list and convenience API.
//!
//! The default list starts empty, so only the implicit `*` rule applies
//! until a list is installed. Installing replaces the whole list at once;
//! the list itself is never mutated in place.

use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

use crate::domain::Domain;
use crate::error::Result;
use crate::ruleset::{ListConfig, RuleSet};
use crate::shared::SharedList;

/// Global default list
static DEFAULT_LIST: Lazy<SharedList> = Lazy::new(SharedList::default);

/// Get the shared handle behind the default list.
pub fn default_handle() -> &'static SharedList {
    &DEFAULT_LIST
}

/// Get the current default list.
pub fn default_list() -> Arc<RuleSet> {
    DEFAULT_LIST.snapshot()
}

/// Replace the default list.
pub fn install_default_list(ruleset: RuleSet) {
    DEFAULT_LIST.reload(ruleset);
}

/// Replace the default list with one loaded from a file.
///
/// On error the current default list stays in place.
pub fn load_default_list_from_path(path: &Path, config: &ListConfig) -> Result<()> {
    DEFAULT_LIST.reload_from_path(path, config)
}

/// Reset the default list to an empty one.
pub fn reset_default_list() {
    DEFAULT_LIST.reload(RuleSet::new());
}

/// Parse a name against the default list.
///
/// # Examples
/// ```ignore
/// use pubsuffix::{global, ListConfig, RuleSet};
///
/// global::install_default_list(RuleSet::parse("co.uk\n", &ListConfig::default())?);
/// let domain = global::parse("www.example.co.uk")?;
/// assert_eq!(domain.tld(), "co.uk");
/// ```
pub fn parse(name: &str) -> Result<Domain> {
    DEFAULT_LIST.parse(name)
}

/// Check a name against the default list, ignoring private rules.
pub fn is_valid(name: &str) -> bool {
    DEFAULT_LIST.is_valid(name)
}

/// Get the registrable domain of a name from the default list.
pub fn registrable_domain(name: &str) -> Result<String> {
    DEFAULT_LIST.registrable_domain(name)
}

/// Get the registrable domain of a name from the default list, or `None`.
pub fn domain(name: &str) -> Option<String> {
    DEFAULT_LIST.domain(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so parallel test threads do not race on the global list.
    #[test]
    fn test_default_list_lifecycle() {
        reset_default_list();
        assert!(default_list().is_empty());

        // Only the implicit rule applies
        assert_eq!(domain("www.example.co.uk"), Some("co.uk".to_string()));
        assert!(is_valid("example.com"));
        assert!(parse("com").unwrap_err().is_not_allowed());

        install_default_list(RuleSet::parse("uk\nco.uk\n", &ListConfig::default()).unwrap());
        assert_eq!(default_list().len(), 2);
        assert_eq!(domain("www.example.co.uk"), Some("example.co.uk".to_string()));
        assert_eq!(registrable_domain("a.b.example.co.uk").unwrap(), "example.co.uk");
        assert!(!is_valid("co.uk"));

        let generation = default_handle().generation();
        reset_default_list();
        assert!(default_handle().generation() > generation);
        assert!(default_list().is_empty());
    }
}
