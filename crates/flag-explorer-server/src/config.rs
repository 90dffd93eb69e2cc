use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use flag_explorer::ServiceConfig;
use flag_explorer::service::{DEFAULT_FALLBACK_FLAG_URL, DEFAULT_RETRY_DELAY};
use flag_explorer_restcountries::{DEFAULT_API_URL, UpstreamConfig};
use flag_explorer_store::StoreConfig;

/// Server configuration. Every value can come from a flag or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "flag-explorer")]
#[command(about = "Serve country names, flags, populations and capitals over HTTP")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path prefix for every route
    #[arg(long = "api-prefix", env = "API_GLOBAL_PREFIX", default_value = "api")]
    pub api_prefix: String,

    /// Origin allowed to make cross-origin requests
    #[arg(long = "frontend-url", env = "FRONTEND_URL", default_value = "http://localhost:3001")]
    pub frontend_url: String,

    /// Upstream endpoint returning the full country list
    #[arg(long = "upstream-url", env = "REST_COUNTRIES_API_URL", default_value = DEFAULT_API_URL)]
    pub upstream_url: String,

    /// Upstream request timeout in milliseconds
    #[arg(
        long = "upstream-timeout-ms",
        env = "REST_COUNTRIES_API_TIMEOUT",
        default_value_t = 5000
    )]
    pub upstream_timeout_ms: u64,

    /// How long a cached country list stays valid, in seconds
    #[arg(long = "cache-ttl-seconds", env = "CACHE_TTL_SECONDS", default_value_t = 3600)]
    pub cache_ttl_seconds: u64,

    /// Maximum number of cache entries
    #[arg(long = "max-cache-size", env = "MAX_CACHE_SIZE", default_value_t = 280)]
    pub max_cache_size: u64,

    /// Flag image used for countries without one
    #[arg(long = "no-flag-url", env = "NO_CFLAG_URL", default_value = DEFAULT_FALLBACK_FLAG_URL)]
    pub no_flag_url: String,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// The prefix as a route path: `api` and `/api/` both become `/api`,
    /// and an empty prefix mounts routes at the root.
    pub fn route_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            url: self.upstream_url.clone(),
            timeout: Duration::from_millis(self.upstream_timeout_ms),
        }
    }

    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            ttl: Duration::from_secs(self.cache_ttl_seconds),
            max_entries: self.max_cache_size,
        }
    }

    pub fn service(&self) -> ServiceConfig {
        ServiceConfig {
            fallback_flag_url: self.no_flag_url.clone(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Load `.env` from the working directory if there is one.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("warning: failed to load .env file: {e}");
    }
}
