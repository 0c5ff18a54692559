use axum::{routing::post, Router};

use crate::handlers::service_handler::create_completion;
use crate::state::AppState;

pub fn prompt_routes() -> Router<AppState> {
    Router::new().route("/prompt", post(create_completion))
}
