//! Expiring key/value store
//!
//! Provides a `Cache` that maps string keys to values stamped with an expiry
//! time. Readers decide what to do with stale entries.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Source of the current time used for expiry decisions
pub trait Clock {
    /// Returns the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by `Utc::now`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// A cached value together with the instant it stops being fresh
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// When the entry expires
    expire_at: DateTime<Utc>,
    /// The cached data
    data: T,
}

impl<T> CacheEntry<T> {
    /// Creates an entry expiring at `expire_at`
    pub fn new(data: T, expire_at: DateTime<Utc>) -> Self {
        Self { expire_at, data }
    }

    /// The cached data
    pub fn data(&self) -> &T {
        &self.data
    }

    /// When the entry expires
    pub fn expire_at(&self) -> DateTime<Utc> {
        self.expire_at
    }

    /// Whether the entry has expired as of `now`
    ///
    /// An entry is expired from its `expire_at` instant onwards.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expire_at
    }
}

/// Mapping from string keys to expiring entries
///
/// There is no eviction: memory stays bounded only as long as callers reuse
/// a fixed set of keys. Not synchronized; wrap it in a lock when shared.
#[derive(Debug, Clone)]
pub struct Cache<T> {
    entries: HashMap<String, CacheEntry<T>>,
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cache<T> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Stores `value` under `key`, replacing any previous entry
    ///
    /// # Arguments
    /// * `key` - Cache key (e.g., "asteroids_response_data")
    /// * `value` - The data to cache
    /// * `expire_at` - Instant from which the entry counts as expired
    pub fn set(&mut self, key: impl Into<String>, value: T, expire_at: DateTime<Utc>) {
        self.entries
            .insert(key.into(), CacheEntry::new(value, expire_at));
    }

    /// Looks up the entry for `key`
    ///
    /// Returns expired entries too; the caller checks `is_expired_at`.
    pub fn get(&self, key: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }
}
