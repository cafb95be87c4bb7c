//! Parse, validate and extract registrable domains against a rule set.

use crate::domain::{decompose, Domain};
use crate::error::{Error, InvalidReason, Result};
use crate::normalize::{labels, normalize};
use crate::ruleset::{FindOptions, RuleSet};

/// Parse a name into a [`Domain`] using default lookup options.
///
/// # Examples
/// ```
/// use pubsuffix::{parse, ListConfig, RuleSet};
///
/// let list = RuleSet::parse("com\nco.uk\n", &ListConfig::default()).unwrap();
/// let domain = parse("www.example.co.uk", &list).unwrap();
/// assert_eq!(domain.tld(), "co.uk");
/// assert_eq!(domain.sld(), Some("example"));
/// assert_eq!(domain.trd(), Some("www"));
/// ```
pub fn parse(name: &str, list: &RuleSet) -> Result<Domain> {
    parse_with(name, list, &FindOptions::default())
}

/// Parse a name into a [`Domain`].
///
/// Fails with `DomainInvalid` if the name does not normalize or no rule
/// matches, and with `DomainNotAllowed` if the name is a public suffix.
pub fn parse_with(name: &str, list: &RuleSet, options: &FindOptions) -> Result<Domain> {
    let name = normalize(name)?;
    let rule = list
        .find(&name, options)
        .ok_or_else(|| Error::invalid(&name, InvalidReason::NoMatchingRule))?;

    let domain = decompose(rule, &name)
        .ok_or_else(|| Error::invalid(&name, InvalidReason::NoMatchingRule))?;

    if !domain.is_domain() {
        return Err(Error::DomainNotAllowed(name));
    }
    Ok(domain)
}

/// Check whether a name is a valid, registrable domain.
///
/// Rules from the private section are ignored.
pub fn is_valid(name: &str, list: &RuleSet) -> bool {
    is_valid_with(name, list, &FindOptions::default().ignore_private(true))
}

/// Check whether a name is a valid, registrable domain with explicit options.
pub fn is_valid_with(name: &str, list: &RuleSet, options: &FindOptions) -> bool {
    parse_with(name, list, options).is_ok()
}

/// Get the registrable domain (`sld.tld`) of a name.
pub fn registrable_domain(name: &str, list: &RuleSet) -> Result<String> {
    registrable_domain_with(name, list, &FindOptions::default())
}

/// Get the registrable domain of a name with explicit options.
///
/// Only the matched rule's split point is used, no [`Domain`] is built.
pub fn registrable_domain_with(
    name: &str,
    list: &RuleSet,
    options: &FindOptions,
) -> Result<String> {
    let name = normalize(name)?;
    let rule = list
        .find(&name, options)
        .ok_or_else(|| Error::invalid(&name, InvalidReason::NoMatchingRule))?;

    let labels = labels(&name);
    match rule.split_point(&labels) {
        Some(0) => Err(Error::DomainNotAllowed(name)),
        Some(at) => Ok(labels[at - 1..].join(".")),
        None => Err(Error::invalid(&name, InvalidReason::NoMatchingRule)),
    }
}

/// Get the registrable domain of a name, or `None` on any failure.
pub fn domain(name: &str, list: &RuleSet) -> Option<String> {
    parse(name, list).ok().and_then(|d| d.domain())
}
