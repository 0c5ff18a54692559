use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::StartupError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_INSTRUCTION_PATH: &str = "prompts/system.txt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Everything the completion client needs at construction time.
#[derive(Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub instruction_path: PathBuf,
    pub timeout: Duration,
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("instruction_path", &self.instruction_path)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CompletionConfig {
    /// Reads `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `SYSTEM_PROMPT_PATH` and
    /// `COMPLETION_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(StartupError::MissingEnv("OPENAI_API_KEY"))?;

        let base_url = lookup("OPENAI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let instruction_path = lookup("SYSTEM_PROMPT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INSTRUCTION_PATH));

        let timeout_secs = match lookup("COMPLETION_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url,
            instruction_path,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_timeout(raw: &str) -> Result<u64, StartupError> {
    let secs: u64 = raw.trim().parse().map_err(|e| StartupError::InvalidEnv {
        name: "COMPLETION_TIMEOUT_SECS",
        reason: format!("{e}"),
    })?;
    if secs == 0 {
        return Err(StartupError::InvalidEnv {
            name: "COMPLETION_TIMEOUT_SECS",
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(secs)
}
