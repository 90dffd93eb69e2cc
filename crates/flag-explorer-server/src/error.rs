use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flag_explorer::ServiceError;
use serde_json::json;

/// HTTP face of a [`ServiceError`].
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::UpstreamUnavailable(_)
            | ServiceError::NoDataAvailable
            | ServiceError::Interrupted => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        error_response(status, self.0.to_string())
    }
}

/// JSON error body: `{"statusCode": 404, "message": "...", "error": "Not Found"}`.
pub fn error_response(status: StatusCode, message: String) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "message": message,
        "error": status.canonical_reason().unwrap_or("Error"),
    });
    (status, Json(body)).into_response()
}
