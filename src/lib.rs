//! pubsuffix - Public suffix rule matching and domain decomposition.
//!
//! This crate answers two questions about a bare domain name: which of its
//! trailing labels form a public suffix (a suffix under which independent
//! parties register names), and what its registrable part is.
//!
//! # Features
//!
//! - **Rule matching**: Exact, wildcard and exception rules with
//!   longest-match priority
//! - **Decomposition**: Split names into suffix (`tld`), registrable label
//!   (`sld`) and subdomain (`trd`)
//! - **List loading**: Public suffix list text format, plain or gzipped,
//!   with optional private section
//! - **Hot reload**: Shared, cached list handles that swap atomically
//! - **Thread-safe**: Rule sets are read-only once shared
//!
//! # Quick Start
//!
//! ```
//! use pubsuffix::{parse, ListConfig, RuleSet};
//!
//! let list = RuleSet::parse("com\nco.uk\n*.ck\n!www.ck\n", &ListConfig::default()).unwrap();
//!
//! let domain = parse("www.google.com", &list).unwrap();
//! assert_eq!(domain.tld(), "com");
//! assert_eq!(domain.sld(), Some("google"));
//! assert_eq!(domain.trd(), Some("www"));
//!
//! // A bare public suffix is not a registrable domain
//! assert!(parse("co.uk", &list).unwrap_err().is_not_allowed());
//! ```
//!
//! # Matching Priority
//!
//! When several rules match a name:
//! 1. An exception rule wins (the shortest one if several match)
//! 2. Otherwise the rule with the most labels wins
//! 3. On equal length, an exact rule wins over a wildcard rule
//! 4. With no listed match, the default rule `*` applies

mod api;
mod domain;
mod error;
mod normalize;
mod rule_kind;
mod shared;

pub mod global;
pub mod rule;
pub mod ruleset;

// Re-export core types
pub use domain::{decompose, Domain};
pub use error::{Error, InvalidReason, Result};
pub use normalize::normalize;
pub use rule::Rule;
pub use rule_kind::RuleKind;

// Re-export ruleset types
pub use ruleset::{DefaultRule, FindOptions, ListConfig, ListParser, RuleSet};

// Re-export the public operations
pub use api::{
    domain, is_valid, is_valid_with, parse, parse_with, registrable_domain,
    registrable_domain_with,
};

// Re-export shared list handle
pub use shared::{CacheStats, SharedList, SharedListConfig};
