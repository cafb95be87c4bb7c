//! Shared rule list handle with hot reload support.
//!
//! This module provides a handle around a [`RuleSet`] with:
//! - LRU cache for rule lookups
//! - Atomic replacement of the whole list without blocking readers
//! - Thread-safe concurrent access

use arc_swap::ArcSwap;
use quick_cache::sync::Cache;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::api;
use crate::domain::{self, Domain};
use crate::error::{Error, InvalidReason, Result};
use crate::normalize::normalize;
use crate::rule::Rule;
use crate::ruleset::{DefaultRule, FindOptions, ListConfig, RuleSet};

/// Distinct hostnames remembered by default.
///
/// Entries are keyed by full hostname, so this bounds the working set of
/// hosts a process looks up, not the size of the list.
const DEFAULT_CACHED_NAMES: usize = 4_096;

/// Cache key: normalized name and whether private rules were skipped.
type CacheKey = (String, bool);

/// Configuration for a [`SharedList`].
///
/// ```
/// let config = pubsuffix::SharedListConfig::from_yaml_str("cached_names: 512").unwrap();
/// assert_eq!(config.cached_names, 512);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedListConfig {
    /// Names whose deciding rule is kept per list generation, `0` disables the cache
    pub cached_names: usize,
}

impl SharedListConfig {
    /// Keep the deciding rule for up to `cached_names` names.
    pub fn new(cached_names: usize) -> Self {
        Self { cached_names }
    }

    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

impl Default for SharedListConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CACHED_NAMES)
    }
}

/// Shared rule list with hot reload support.
///
/// Readers always see one complete list: [`SharedList::reload`] swaps in a
/// new `RuleSet` atomically. In-flight lookups finish against the old
/// list, new lookups use the new one.
///
/// # Example
///
/// ```
/// use pubsuffix::{ListConfig, RuleSet, SharedList};
///
/// let list = SharedList::new(RuleSet::parse("com\n", &ListConfig::default()).unwrap());
/// assert_eq!(list.domain("www.example.com").as_deref(), Some("example.com"));
///
/// list.reload(RuleSet::parse("example.com\n", &ListConfig::default()).unwrap());
/// assert_eq!(list.domain("www.example.com").as_deref(), Some("www.example.com"));
/// ```
pub struct SharedList {
    /// The current list, wrapped in ArcSwap for atomic replacement.
    inner: ArcSwap<RuleSet>,
    /// LRU cache of lookup results.
    cache: Option<Cache<CacheKey, Option<Rule>>>,
    /// Configuration.
    config: SharedListConfig,
    /// Generation counter, incremented on each reload.
    generation: AtomicU64,
}

impl SharedList {
    /// Wrap a rule set with default configuration.
    pub fn new(ruleset: RuleSet) -> Self {
        Self::with_config(ruleset, SharedListConfig::default())
    }

    /// Wrap a rule set with custom configuration.
    pub fn with_config(ruleset: RuleSet, config: SharedListConfig) -> Self {
        let cache = (config.cached_names > 0).then(|| Cache::new(config.cached_names));

        Self {
            inner: ArcSwap::from_pointee(ruleset),
            cache,
            config,
            generation: AtomicU64::new(0),
        }
    }

    /// Load a list file with default configuration.
    pub fn open(path: &Path, list_config: &ListConfig) -> Result<Self> {
        Ok(Self::new(RuleSet::from_path(path, list_config)?))
    }

    /// Atomically replace the list and drop cached lookups.
    pub fn reload(&self, ruleset: RuleSet) {
        let len = ruleset.len();
        self.inner.store(Arc::new(ruleset));

        self.generation.fetch_add(1, Ordering::SeqCst);

        if let Some(ref cache) = self.cache {
            cache.clear();
        }

        log::info!("Hot reloaded rule list ({} rules)", len);
    }

    /// Reload the list from a file.
    ///
    /// On error the current list stays in place.
    pub fn reload_from_path(&self, path: &Path, list_config: &ListConfig) -> Result<()> {
        let ruleset = RuleSet::from_path(path, list_config)?;
        self.reload(ruleset);
        Ok(())
    }

    /// Get the current list.
    ///
    /// The returned `Arc` keeps that list alive even after a reload.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.inner.load_full()
    }

    /// Find the deciding rule for a normalized name, with caching.
    ///
    /// Lookups with a custom default rule bypass the cache.
    pub fn find(&self, name: &str, options: &FindOptions) -> Option<Rule> {
        let cache = match (&self.cache, &options.default_rule) {
            (Some(cache), DefaultRule::Implicit) => cache,
            _ => return self.inner.load().find(name, options).cloned(),
        };

        let key = (name.to_string(), options.ignore_private);
        if let Some(result) = cache.get(&key) {
            return result;
        }

        // Read before loading the list so a reload in between is noticed.
        let generation = self.generation();
        let result = self.inner.load().find(name, options).cloned();
        self.remember(cache, key, result.clone(), generation);
        result
    }

    /// Cache a lookup computed against the list of `generation`.
    ///
    /// Nothing is kept once a reload has replaced that list.
    fn remember(
        &self,
        cache: &Cache<CacheKey, Option<Rule>>,
        key: CacheKey,
        result: Option<Rule>,
        generation: u64,
    ) {
        if self.generation() != generation {
            return;
        }
        cache.insert(key.clone(), result);
        // The reload may have cleared the cache between the check and the insert.
        if self.generation() != generation {
            cache.remove(&key);
        }
    }

    /// Parse a name against the current list.
    pub fn parse(&self, name: &str) -> Result<Domain> {
        self.parse_with(name, &FindOptions::default())
    }

    /// Parse a name against the current list with explicit options.
    pub fn parse_with(&self, name: &str, options: &FindOptions) -> Result<Domain> {
        let name = normalize(name)?;
        let rule = self
            .find(&name, options)
            .ok_or_else(|| Error::invalid(&name, InvalidReason::NoMatchingRule))?;

        let domain = domain::decompose(&rule, &name)
            .ok_or_else(|| Error::invalid(&name, InvalidReason::NoMatchingRule))?;

        if !domain.is_domain() {
            return Err(Error::DomainNotAllowed(name));
        }
        Ok(domain)
    }

    /// Check whether a name is a valid, registrable domain.
    ///
    /// Rules from the private section are ignored.
    pub fn is_valid(&self, name: &str) -> bool {
        self.parse_with(name, &FindOptions::default().ignore_private(true))
            .is_ok()
    }

    /// Get the registrable domain of a name.
    pub fn registrable_domain(&self, name: &str) -> Result<String> {
        api::registrable_domain(name, &self.inner.load())
    }

    /// Get the registrable domain of a name, or `None` on any failure.
    pub fn domain(&self, name: &str) -> Option<String> {
        self.parse(name).ok().and_then(|d| d.domain())
    }

    /// Clear the cache.
    pub fn clear_cache(&self) {
        if let Some(ref cache) = self.cache {
            cache.clear();
        }
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        if let Some(ref cache) = self.cache {
            CacheStats {
                capacity: self.config.cached_names,
                len: cache.len(),
                enabled: true,
            }
        } else {
            CacheStats {
                capacity: 0,
                len: 0,
                enabled: false,
            }
        }
    }

    /// Get the current generation (incremented on each reload).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl Default for SharedList {
    fn default() -> Self {
        Self::new(RuleSet::new())
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Maximum cache capacity.
    pub capacity: usize,
    /// Current number of entries in the cache.
    pub len: usize,
    /// Whether caching is enabled.
    pub enabled: bool,
}
