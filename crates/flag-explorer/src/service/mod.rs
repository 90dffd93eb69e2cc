use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::collate;
use crate::country::{CountryDetails, CountrySummary, normalize};
use crate::fetcher::{CountryFetcher, FetchError};
use crate::store::CacheStore;


/// Key of the single cache entry holding the sorted country list.
pub const ALL_COUNTRIES_CACHE_KEY: &str = "all_countries_data_v1";

/// Flag shown for countries whose upstream record carries no flag image.
pub const DEFAULT_FALLBACK_FLAG_URL: &str = "https://placehold.co/60x40?text=No+Flag";

/// Pause between the first failed fetch and the retry.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// One initial fetch plus one retry.
const MAX_ATTEMPTS: u32 = 2;

const REFRESHED_MESSAGE: &str = "Country cache refreshed successfully.";

/// The cached, sorted country list. Shared so cache hits don't copy it.
pub type Snapshot = Arc<Vec<CountryDetails>>;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub fallback_flag_url: String,
    pub retry_delay: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            fallback_flag_url: DEFAULT_FALLBACK_FLAG_URL.to_owned(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Errors surfaced by [`CountryService`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The upstream fetch failed on the first attempt and on the retry.
    #[error("Failed to update country data from external source.")]
    UpstreamUnavailable(#[source] FetchError),

    /// A load succeeded but produced no countries where some are required.
    #[error("No country data available.")]
    NoDataAvailable,

    /// No country matched the requested name. Holds the name as requested.
    #[error("Country with name \"{0}\" not found")]
    NotFound(String),

    /// The background load task panicked or was cancelled. The cause is
    /// logged where it happens and never surfaced to clients.
    #[error("Internal server error")]
    Interrupted,
}

/// Result of a manual cache refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    pub message: String,
    pub count: usize,
}

/// Cache-aside access to the country list.
///
/// Cloning is cheap; clones share the fetcher, the store and therefore the
/// cached snapshot.
#[derive(Clone)]
pub struct CountryService {
    inner: Arc<Inner>,
}

struct Inner {
    fetcher: Arc<dyn CountryFetcher>,
    store: Arc<dyn CacheStore<Snapshot>>,
    config: ServiceConfig,
}

impl CountryService {
    pub fn new(
        fetcher: Arc<dyn CountryFetcher>,
        store: Arc<dyn CacheStore<Snapshot>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                store,
                config,
            }),
        }
    }

    /// Load the country list once in the background.
    ///
    /// Failure is logged and dropped: the first request after a failed
    /// pre-warm simply loads lazily.
    pub fn spawn_prewarm(&self) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            tracing::info!(
                upstream = service.inner.fetcher.label(),
                "pre-warming country cache"
            );
            if let Err(e) = service.load_and_cache().await {
                tracing::error!(error = %e, "failed to pre-warm country cache on startup");
            }
        })
    }

    /// Fetch from upstream, normalize, sort and store the result.
    ///
    /// The load runs on its own task. If the caller stops waiting, the load
    /// still finishes and updates the cache for later callers.
    pub async fn load_and_cache(&self) -> Result<Snapshot, ServiceError> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.load_and_cache().await })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "country load task did not complete");
                ServiceError::Interrupted
            })?
    }

    /// Serve the cached snapshot, loading it first if it is missing or empty.
    pub async fn get_or_fetch(&self) -> Result<Snapshot, ServiceError> {
        if let Some(cached) = self.inner.store.get(ALL_COUNTRIES_CACHE_KEY).await
            && !cached.is_empty()
        {
            tracing::debug!(count = cached.len(), "serving countries from cache");
            return Ok(cached);
        }

        tracing::info!("country cache miss, fetching from upstream");
        self.load_and_cache().await
    }

    /// Every country's name and flag, sorted by name.
    pub async fn list_all(&self) -> Result<Vec<CountrySummary>, ServiceError> {
        let countries = self.get_or_fetch().await?;

        if countries.is_empty() {
            tracing::warn!("no country data available after fetch attempt");
            return Err(ServiceError::NoDataAvailable);
        }

        Ok(countries.iter().map(CountryDetails::summary).collect())
    }

    /// Look up one country by its common name, ignoring case.
    pub async fn get_by_name(&self, name: &str) -> Result<CountryDetails, ServiceError> {
        let countries = self.get_or_fetch().await?;
        let wanted = name.to_lowercase();

        countries
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| {
                tracing::warn!(name, "country not found");
                ServiceError::NotFound(name.to_owned())
            })
    }

    /// Reload from upstream regardless of what is cached.
    ///
    /// An empty upstream answer is reported as a count of zero, not an error.
    pub async fn refresh(&self) -> Result<RefreshReport, ServiceError> {
        tracing::info!("manual country cache refresh triggered");
        let countries = self.load_and_cache().await?;

        Ok(RefreshReport {
            message: REFRESHED_MESSAGE.to_owned(),
            count: countries.len(),
        })
    }
}

impl Inner {
    async fn load_and_cache(&self) -> Result<Snapshot, ServiceError> {
        let mut attempt = 1;

        let raw = loop {
            tracing::info!(
                attempt,
                upstream = self.fetcher.label(),
                "loading countries from upstream"
            );

            match self.fetcher.fetch_all().await {
                Ok(raw) => break raw,
                Err(e) if attempt < MAX_ATTEMPTS => {
                    tracing::error!(error = %e, attempt, "failed to load countries");
                    tracing::info!(
                        delay_ms = self.config.retry_delay.as_millis() as u64,
                        "retrying country load"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, attempt, "failed to load countries, giving up");
                    return Err(ServiceError::UpstreamUnavailable(e));
                }
            }
        };

        if raw.is_empty() {
            tracing::warn!("upstream returned no countries, clearing cache");
            self.store.delete(ALL_COUNTRIES_CACHE_KEY).await;
            return Ok(Arc::new(Vec::new()));
        }

        let mut countries: Vec<CountryDetails> = raw
            .iter()
            .map(|record| normalize(record, &self.config.fallback_flag_url))
            .collect();
        countries.sort_by(|a, b| collate::compare(&a.name, &b.name));

        let snapshot: Snapshot = Arc::new(countries);
        self.store
            .set(ALL_COUNTRIES_CACHE_KEY, Arc::clone(&snapshot))
            .await;

        tracing::info!(count = snapshot.len(), "fetched and cached countries");
        Ok(snapshot)
    }
}
