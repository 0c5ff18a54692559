use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use prompt_service::ProviderError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Provider(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
        };
        tracing::error!(error = %self, status = status.as_u16(), "request failed");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
