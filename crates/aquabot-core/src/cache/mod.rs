//! TTL-bounded cache of the last fetched irrigation plan list.
//!
//! The cache owns two store keys: the JSON-encoded plan list and the RFC 3339
//! timestamp of when it was written. An entry is fresh while
//! `now - timestamp <= ttl` (24 hours by default). Stale entries are purged
//! the next time they are read; there is no background sweep.
//!
//! Read paths never fail: a storage fault or an undecodable entry is logged
//! and reported as "no cache", which sends the caller back to the network.
//!
//! ```rust
//! use aquabot_core::{cache::PlanCache, store::MemoryStore};
//!
//! # async fn example() -> aquabot_core::Result<()> {
//! let cache = PlanCache::new(MemoryStore::new());
//! cache.save_plans(&[serde_json::json!({"id": 1})]).await?;
//!
//! let plans: Option<Vec<serde_json::Value>> = cache.load_plans().await;
//! assert_eq!(plans.map(|p| p.len()), Some(1));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    clock::{Clock, SystemClock},
    error::Result,
    models::CachedPlanSet,
    store::KeyValueStore,
};

/// Store key holding the encoded plan list.
pub const PLANS_KEY: &str = "irrigation_plans_cache";
/// Store key holding the time the plan list was cached.
pub const TIMESTAMP_KEY: &str = "irrigation_plans_cache_timestamp";
/// Default freshness window.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Persistent, TTL-bounded cache of irrigation plans.
pub struct PlanCache<S> {
    store: S,
    clock: Arc<dyn Clock>,
    ttl: SignedDuration,
}

impl<S: KeyValueStore> PlanCache<S> {
    /// Creates a cache on `store` using wall-clock time and the 24 hour TTL.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl: DEFAULT_TTL,
        }
    }

    /// Overrides the freshness window.
    pub fn with_ttl(mut self, ttl: SignedDuration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Serializes `plans` and stamps them with the current time.
    ///
    /// # Errors
    ///
    /// Returns the underlying store or serialization error; nothing is retried.
    pub async fn save_plans<T: Serialize>(&self, plans: &[T]) -> Result<()> {
        let payload = serde_json::to_string(plans)?;
        let stamp = self.clock.now();

        self.store.set(PLANS_KEY, &payload).await?;
        self.store.set(TIMESTAMP_KEY, &stamp.to_string()).await?;

        debug!("Cached {} irrigation plans at {stamp}", plans.len());
        Ok(())
    }

    /// Returns the cached plans, or `None` when absent, stale, or unreadable.
    pub async fn load_plans<T: DeserializeOwned>(&self) -> Option<Vec<T>> {
        self.load_snapshot().await.map(|snapshot| snapshot.plans)
    }

    /// Like [`Self::load_plans`] but also returns when the entry was written.
    pub async fn load_snapshot<T: DeserializeOwned>(&self) -> Option<CachedPlanSet<T>> {
        let timestamp = self.fresh_timestamp().await?;

        let payload = match self.store.get(PLANS_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read cached plans: {e}");
                return None;
            }
        };

        match serde_json::from_str::<Vec<T>>(&payload) {
            Ok(plans) => Some(CachedPlanSet { plans, timestamp }),
            Err(e) => {
                warn!("Discarding undecodable plan cache: {e}");
                self.purge().await;
                None
            }
        }
    }

    /// Cheap freshness check that does not decode the payload.
    ///
    /// Stale entries are evicted exactly as [`Self::load_plans`] would.
    pub async fn has_valid_cache(&self) -> bool {
        if self.fresh_timestamp().await.is_none() {
            return false;
        }
        match self.store.get(PLANS_KEY).await {
            Ok(payload) => payload.is_some(),
            Err(e) => {
                warn!("Failed to read cached plans: {e}");
                false
            }
        }
    }

    /// Age of the current fresh entry, if there is one.
    pub async fn cache_age(&self) -> Option<SignedDuration> {
        let timestamp = self.fresh_timestamp().await?;
        Some(self.clock.now().duration_since(timestamp))
    }

    /// Unconditionally removes both cache entries.
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered; the second key is still
    /// attempted.
    pub async fn clear_cache(&self) -> Result<()> {
        let plans = self.store.remove(PLANS_KEY).await;
        let timestamp = self.store.remove(TIMESTAMP_KEY).await;
        plans.and(timestamp)
    }

    /// Reads the timestamp entry, evicting the cache when it is stale or
    /// corrupt.
    async fn fresh_timestamp(&self) -> Option<Timestamp> {
        let raw = match self.store.get(TIMESTAMP_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read plan cache timestamp: {e}");
                return None;
            }
        };

        let timestamp = match raw.parse::<Timestamp>() {
            Ok(timestamp) => timestamp,
            Err(e) => {
                warn!("Discarding plan cache with invalid timestamp '{raw}': {e}");
                self.purge().await;
                return None;
            }
        };

        let age = self.clock.now().duration_since(timestamp);
        if age > self.ttl {
            debug!("Plan cache expired (age {age:#})");
            self.purge().await;
            return None;
        }

        Some(timestamp)
    }

    async fn purge(&self) {
        if let Err(e) = self.clear_cache().await {
            warn!("Failed to evict plan cache: {e}");
        }
    }
}
