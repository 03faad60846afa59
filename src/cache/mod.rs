//! In-memory cache for upstream feed responses
//!
//! This module provides a keyed cache whose entries carry an absolute expiry
//! timestamp. Expiry is checked lazily by the reader; nothing is evicted in
//! the background, and an expired entry stays in place until the same key is
//! written again.

mod store;

pub use store::{Cache, CacheEntry, Clock, SystemClock};
