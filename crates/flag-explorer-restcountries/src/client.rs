use std::time::Duration;

use flag_explorer::{CountryFetcher, FetchError, RawCountryRecord};

/// The public REST Countries v3.1 endpoint, limited to the fields we read.
pub const DEFAULT_API_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,population,capital,flags";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

const MAX_REDIRECTS: usize = 5;

/// Configuration for the upstream country endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the REST Countries API.
///
/// One GET per `fetch_all`, no retries. The request timeout covers the whole
/// exchange, body included.
pub struct RestCountriesClient {
    client: reqwest::Client,
    url: String,
}

impl RestCountriesClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent("flag-explorer")
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url,
        })
    }
}

#[async_trait::async_trait]
impl CountryFetcher for RestCountriesClient {
    fn label(&self) -> &str {
        &self.url
    }

    async fn fetch_all(&self) -> Result<Vec<RawCountryRecord>, FetchError> {
        tracing::info!(url = %self.url, "fetching all countries from upstream");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::error!(url = %self.url, error = %e, "upstream request failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %self.url, %status, "upstream returned error status");
            return Err(FetchError::Transport(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        let countries: Vec<RawCountryRecord> = response.json().await.map_err(|e| {
            tracing::error!(url = %self.url, error = %e, "failed to decode upstream response");
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        tracing::info!(count = countries.len(), "fetched countries from upstream");
        Ok(countries)
    }
}
