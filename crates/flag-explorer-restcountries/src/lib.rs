pub mod client;

pub use client::{DEFAULT_API_URL, DEFAULT_TIMEOUT, RestCountriesClient, UpstreamConfig};
