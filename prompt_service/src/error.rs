use std::path::PathBuf;
use std::time::Duration;

/// Failure of a single call to the completion provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("completion provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("completion provider unreachable: {0}")]
    Unreachable(String),
    #[error("completion provider rejected the credentials ({status})")]
    Unauthorized { status: u16 },
    #[error("completion provider returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed completion response: {0}")]
    Malformed(String),
    #[error("completion response contained no output text")]
    Empty,
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}

/// Anything that keeps the process from starting to serve.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("{0} must be set")]
    MissingEnv(&'static str),
    #[error("{name} is not valid: {reason}")]
    InvalidEnv { name: &'static str, reason: String },
    #[error("failed to read system instruction from {}", .path.display())]
    Instruction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
