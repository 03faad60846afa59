//! Asteroid data handler
//!
//! Ties the feed client, response cache and parser together: raw feed bytes
//! are cached for a short time and parsed on every call, then sorted by
//! close approach time.

use std::future::Future;
use std::sync::Arc;

use chrono::Duration;
use log::debug;
use tokio::sync::Mutex;

use super::{parse_asteroids, Asteroid, AsteroidsError, Feed};
use crate::cache::{Cache, Clock, SystemClock};

/// Cache key for the raw feed response
pub const CACHE_KEY: &str = "asteroids_response_data";

/// Time-to-live for the cached feed response in minutes
pub const CACHE_TTL_MINUTES: i64 = 10;

/// Anything that can produce the sorted hazardous asteroid list
pub trait AsteroidsSource {
    /// Returns every hazardous asteroid, ascending by close approach time
    fn get_all(&self) -> impl Future<Output = Result<Vec<Asteroid>, AsteroidsError>> + Send;
}

/// Fetches, caches and parses asteroid data from a feed
///
/// The cache lock is held from lookup until the fresh response is stored, so
/// concurrent callers that miss the cache wait for a single upstream fetch
/// instead of each issuing their own.
#[derive(Debug)]
pub struct AsteroidsDataHandler<F, C = SystemClock> {
    feed: F,
    cache: Mutex<Cache<Arc<[u8]>>>,
    clock: C,
}

impl<F: Feed> AsteroidsDataHandler<F> {
    /// Creates a handler with an empty cache using the wall clock
    pub fn new(feed: F) -> Self {
        Self::with_clock(feed, SystemClock)
    }
}

impl<F: Feed, C: Clock> AsteroidsDataHandler<F, C> {
    /// Creates a handler with an empty cache and a custom clock
    pub fn with_clock(feed: F, clock: C) -> Self {
        Self {
            feed,
            cache: Mutex::new(Cache::new()),
            clock,
        }
    }

    /// Returns the raw feed response, from cache when still fresh
    ///
    /// On fetch failure the cache is left as it was.
    async fn response_data(&self) -> Result<Arc<[u8]>, AsteroidsError> {
        let mut cache = self.cache.lock().await;

        if let Some(entry) = cache.get(CACHE_KEY) {
            if !entry.is_expired_at(self.clock.now()) {
                debug!("retrieving asteroid data from cache");
                return Ok(Arc::clone(entry.data()));
            }
        }

        debug!("cached response item not set or expired, retrieving asteroid data from feed");

        let data: Arc<[u8]> = self.feed.fetch().await?.into();
        let expire_at = self.clock.now() + Duration::minutes(CACHE_TTL_MINUTES);
        cache.set(CACHE_KEY, Arc::clone(&data), expire_at);

        Ok(data)
    }
}

impl<F, C> AsteroidsSource for AsteroidsDataHandler<F, C>
where
    F: Feed + Send + Sync,
    C: Clock + Send + Sync,
{
    async fn get_all(&self) -> Result<Vec<Asteroid>, AsteroidsError> {
        let raw = self.response_data().await?;

        let mut asteroids = parse_asteroids(&raw)?;
        // Stable: equal timestamps keep their parsed order
        asteroids.sort_by_key(|asteroid| asteroid.close_approach_timestamp);

        debug!("returning {} hazardous asteroids", asteroids.len());
        Ok(asteroids)
    }
}
