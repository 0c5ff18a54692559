pub mod completion;
pub mod config;
pub mod error;
pub mod extractor;
pub mod service;
#[cfg(any(test, feature = "stub"))]
pub mod stub;
pub mod utils;

pub use completion::{Completion, CompletionProvider, OpenAiProvider, ProviderRequest, Usage};
pub use config::CompletionConfig;
pub use error::{ProviderError, StartupError};
pub use service::PromptService;

/// Installs the fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
