use std::sync::Arc;

use prompt_service::PromptService;
use sqlx::MySqlPool;

use crate::config::Settings;

/// Built once in `main` and handed to every handler through axum state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub prompt_service: Arc<PromptService>,
    pub db: MySqlPool,
}

impl AppState {
    pub fn new(settings: Settings, prompt_service: PromptService, db: MySqlPool) -> Self {
        AppState {
            settings: Arc::new(settings),
            prompt_service: Arc::new(prompt_service),
            db,
        }
    }
}
