//! Decomposed domain names.

use serde::Serialize;
use std::fmt;

use crate::normalize;
use crate::rule::Rule;

/// Domain is a name split into public suffix, registrable label and
/// subdomain.
///
/// ```
/// use pubsuffix::Domain;
///
/// let domain = Domain::new("co.uk", Some("example"), Some("www"));
/// assert_eq!(domain.name(), "www.example.co.uk");
/// assert_eq!(domain.domain().as_deref(), Some("example.co.uk"));
/// assert!(domain.is_subdomain());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Domain {
    tld: String,
    sld: Option<String>,
    trd: Option<String>,
}

impl Domain {
    /// Create a domain from its parts.
    ///
    /// A `trd` without an `sld` is dropped.
    pub fn new(tld: impl Into<String>, sld: Option<&str>, trd: Option<&str>) -> Self {
        let sld = sld.map(str::to_string);
        let trd = if sld.is_some() {
            trd.map(str::to_string)
        } else {
            None
        };
        Self {
            tld: tld.into(),
            sld,
            trd,
        }
    }

    /// Public suffix, e.g. `co.uk`.
    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// Registrable label left of the public suffix.
    pub fn sld(&self) -> Option<&str> {
        self.sld.as_deref()
    }

    /// Remaining labels left of the registrable label.
    pub fn trd(&self) -> Option<&str> {
        self.trd.as_deref()
    }

    /// Present parts, leftmost first.
    pub fn parts(&self) -> Vec<&str> {
        [self.trd(), self.sld(), Some(self.tld())]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Full domain name.
    pub fn name(&self) -> String {
        self.parts().join(".")
    }

    /// All labels of the full name, leftmost first.
    pub fn labels(&self) -> Vec<String> {
        normalize::labels(&self.name())
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Registrable domain (`sld.tld`), if there is a registrable label.
    pub fn domain(&self) -> Option<String> {
        self.sld.as_ref().map(|sld| format!("{}.{}", sld, self.tld))
    }

    /// Alias of [`Domain::domain`].
    pub fn registrable_domain(&self) -> Option<String> {
        self.domain()
    }

    /// Full subdomain name (`trd.sld.tld`), if there is a subdomain part.
    pub fn subdomain(&self) -> Option<String> {
        match (&self.trd, &self.sld) {
            (Some(trd), Some(sld)) => Some(format!("{}.{}.{}", trd, sld, self.tld)),
            _ => None,
        }
    }

    /// Whether there is a registrable label.
    pub fn is_domain(&self) -> bool {
        self.sld.is_some()
    }

    /// Whether there is a subdomain part.
    pub fn is_subdomain(&self) -> bool {
        self.trd.is_some()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Split a normalized name with the rule that matched it.
///
/// Returns `None` if the rule does not match the name.
pub fn decompose(rule: &Rule, name: &str) -> Option<Domain> {
    let labels = normalize::labels(name);
    let at = rule.split_point(&labels)?;

    let (leftover, suffix) = labels.split_at(at);
    let tld = suffix.join(".");

    let domain = match leftover.split_last() {
        Some((sld, rest)) => {
            let trd = (!rest.is_empty()).then(|| rest.join("."));
            Domain::new(tld, Some(*sld), trd.as_deref())
        }
        None => Domain::new(tld, None, None),
    };
    Some(domain)
}
