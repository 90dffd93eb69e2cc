pub mod collate;
pub mod country;
pub mod fetcher;
pub mod service;
pub mod store;

pub use country::{
    CountryDetails, CountrySummary, RawCountryFlags, RawCountryName, RawCountryRecord, normalize,
};
pub use fetcher::{CountryFetcher, FetchError};
pub use service::{
    ALL_COUNTRIES_CACHE_KEY, CountryService, RefreshReport, ServiceConfig, ServiceError, Snapshot,
};
pub use store::CacheStore;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
