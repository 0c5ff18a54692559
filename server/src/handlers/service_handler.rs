use axum::extract::{Json, State};

use crate::error::ApiError;
use crate::models::completion::{CompletionRequest, CompletionResponse};
use crate::state::AppState;

/// POST /prompt
pub async fn create_completion(
    State(state): State<AppState>,
    Json(payload): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    tracing::debug!(html_bytes = payload.web_page.len(), "completion requested");

    let completion = state
        .prompt_service
        .create_completion(&payload.web_page)
        .await?;

    Ok(Json(CompletionResponse { completion }))
}
