use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method};
use flag_explorer::{CountryService, Snapshot};
use flag_explorer_restcountries::RestCountriesClient;
use flag_explorer_store::MokaStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes;

/// Assemble the HTTP application around an existing service.
pub fn build_app(service: CountryService, config: &Config) -> Result<Router> {
    let prefix = config.route_prefix();
    let countries = routes::countries(service);

    let app = if prefix.is_empty() {
        countries
    } else {
        Router::new().nest(&prefix, countries)
    };

    Ok(app
        .fallback(routes::fallback)
        .layer(cors_layer(&config.frontend_url)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods([
        Method::GET,
        Method::HEAD,
        Method::PUT,
        Method::PATCH,
        Method::POST,
        Method::DELETE,
        Method::OPTIONS,
    ]);

    // Browsers refuse credentials on a wildcard origin, and tower-http
    // rejects the combination outright.
    if origin == "*" {
        tracing::warn!("CORS origin is a wildcard, credentials will not be allowed");
        return Ok(layer.allow_origin(Any));
    }

    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("invalid CORS origin: {origin}"))?;

    Ok(layer.allow_origin(origin).allow_credentials(true))
}

/// Wire the production fetcher and store into a service.
pub fn build_service(config: &Config) -> Result<CountryService> {
    let fetcher =
        RestCountriesClient::new(config.upstream()).context("failed to build upstream client")?;
    let store: MokaStore<Snapshot> = MokaStore::new(config.store());

    Ok(CountryService::new(
        Arc::new(fetcher),
        Arc::new(store),
        config.service(),
    ))
}

/// Start the pre-warm, then serve until Ctrl+C.
pub async fn run(config: Config) -> Result<()> {
    let service = build_service(&config)?;
    service.spawn_prewarm();

    let app = build_app(service, &config)?;
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(origin = %config.frontend_url, "CORS enabled");
    tracing::info!(
        %addr,
        prefix = %config.route_prefix(),
        upstream = %config.upstream_url,
        "flag explorer listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
