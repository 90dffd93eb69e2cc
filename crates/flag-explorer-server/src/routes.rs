use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use axum::routing::{get, post};
use flag_explorer::{CountryDetails, CountryService, CountrySummary, RefreshReport};

use crate::error::{ApiError, error_response};

/// Country routes, relative to the API prefix.
pub fn countries(service: CountryService) -> Router {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/{name}", get(get_country))
        .route("/countries/cache/refresh", post(refresh_cache))
        .with_state(service)
}

async fn list_countries(
    State(service): State<CountryService>,
) -> Result<Json<Vec<CountrySummary>>, ApiError> {
    Ok(Json(service.list_all().await?))
}

async fn get_country(
    State(service): State<CountryService>,
    Path(name): Path<String>,
) -> Result<Json<CountryDetails>, ApiError> {
    Ok(Json(service.get_by_name(&name).await?))
}

async fn refresh_cache(
    State(service): State<CountryService>,
) -> Result<Json<RefreshReport>, ApiError> {
    Ok(Json(service.refresh().await?))
}

pub async fn fallback(method: Method, uri: Uri) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Cannot {method} {}", uri.path()),
    )
}
