use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::db;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello" }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let db_ok = match db::ping(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            false
        }
    };

    Json(json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "database": if db_ok { "ok" } else { "error" },
    }))
}
