mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod state;

use anyhow::Context;
use prompt_service::PromptService;
use tokio::net::TcpListener;

use config::Settings;
use routes::create_router;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    prompt_service::init_tracing();

    let settings = Settings::from_env().context("invalid configuration")?;

    let pool = db::init_db(&settings.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("database pool ready");

    let prompt_service = PromptService::load(&settings.completion)
        .context("failed to build prompt service")?;

    let addr = settings.bind_addr();
    let app = create_router(AppState::new(settings, prompt_service, pool.clone()));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down, closing database pool");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
