use std::sync::Arc;

use crate::country::RawCountryRecord;

/// Errors raised by a single upstream fetch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Network failure, timeout, or a non-success HTTP status.
    #[error("External API Error: {0}")]
    Transport(String),

    /// The upstream answered, but the body was not a country array.
    #[error("External API Error: malformed response: {0}")]
    Decode(String),
}

/// Provides the full upstream country list.
///
/// Implementations make exactly one attempt per call. Retrying is the
/// caller's decision.
#[async_trait::async_trait]
pub trait CountryFetcher: Send + Sync {
    /// Human-readable label identifying the upstream (usually its URL).
    fn label(&self) -> &str;

    /// Fetch every country record. An empty list is a valid answer.
    async fn fetch_all(&self) -> Result<Vec<RawCountryRecord>, FetchError>;
}

#[async_trait::async_trait]
impl<T: CountryFetcher + ?Sized> CountryFetcher for Arc<T> {
    fn label(&self) -> &str {
        (**self).label()
    }

    async fn fetch_all(&self) -> Result<Vec<RawCountryRecord>, FetchError> {
        (**self).fetch_all().await
    }
}
