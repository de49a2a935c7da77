use lru::LruCache;
use std::num::NonZeroUsize;

use super::aggregate::{aggregate, AggregationError};
use crate::types::{Aggregation, CacheKey, OrderRecord};

/// Caches aggregation results by input content.
///
/// Owned by the caller; the aggregator itself never caches. A capacity of
/// zero disables caching entirely.
pub struct AggregationCache {
    cache: Option<LruCache<CacheKey, Aggregation>>,
    hits: u64,
    misses: u64,
}

impl AggregationCache {
    /// Create a cache holding up to `capacity` results
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(LruCache::new),
            hits: 0,
            misses: 0,
        }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Store a result in the cache
    pub fn store(&mut self, key: CacheKey, result: Aggregation) {
        if let Some(cache) = self.cache.as_mut() {
            cache.put(key, result);
        }
    }

    /// Retrieve a result from the cache
    pub fn get(&mut self, key: &CacheKey) -> Option<&Aggregation> {
        self.cache.as_mut()?.get(key)
    }

    /// Return the cached aggregation of `orders`, computing and storing it on
    /// a miss.
    pub fn get_or_aggregate(
        &mut self,
        orders: &[OrderRecord],
    ) -> Result<Aggregation, AggregationError> {
        let key = CacheKey::from_orders(orders);
        if let Some(hit) = self.get(&key) {
            let hit = hit.clone();
            self.hits += 1;
            log::debug!("Aggregation cache hit for {} records", key.record_count);
            return Ok(hit);
        }

        self.misses += 1;
        log::debug!("Aggregation cache miss for {} records", key.record_count);
        let result = aggregate(orders)?;
        self.store(key, result.clone());
        Ok(result)
    }

    /// Number of stored results
    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(hits, misses)` since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

impl Default for AggregationCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CACHE_CAPACITY)
    }
}
