use std::time::Duration;

use flag_explorer::CacheStore;
use moka::future::Cache;

/// Entries expire an hour after they were written.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

pub const DEFAULT_MAX_ENTRIES: u64 = 280;

/// Expiry and capacity policy for a [`MokaStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub ttl: Duration,
    pub max_entries: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// In-process cache store with time-to-live expiry and a bounded entry count.
///
/// Nothing survives a restart. Eviction and expiry run lazily inside moka, so
/// `entry_count` may briefly exceed the configured maximum.
pub struct MokaStore<V> {
    cache: Cache<String, V>,
}

impl<V> MokaStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(config: StoreConfig) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.ttl)
                .build(),
        }
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Apply pending evictions and expirations now.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait::async_trait]
impl<V> CacheStore<V> for MokaStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        self.cache.get(key).await
    }

    async fn set(&self, key: &str, value: V) {
        self.cache.insert(key.to_owned(), value).await;
    }

    async fn delete(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}
