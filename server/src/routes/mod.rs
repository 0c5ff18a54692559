pub mod prompt;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::status_handlers::{health, root};
use crate::state::AppState;
use prompt::prompt_routes;

pub fn create_router(state: AppState) -> Router {
    let max_page_bytes = state.settings.max_page_bytes;
    let cors = match state.settings.client_origin.clone() {
        Some(origin) => CorsLayer::new().allow_origin(origin),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
    .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(prompt_routes())
        .layer(DefaultBodyLimit::max(max_page_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
