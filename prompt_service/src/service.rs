use std::sync::Arc;

use tracing::{info, warn};

use crate::completion::{CompletionProvider, OpenAiProvider, ProviderRequest, MODEL, TEMPERATURE};
use crate::config::CompletionConfig;
use crate::error::{ProviderError, StartupError};
use crate::extractor;
use crate::utils;

/// Turns web pages into completions.
///
/// Built once at startup. The system instruction is read a single time and
/// never changes afterwards; every call reuses it.
pub struct PromptService {
    instruction: String,
    provider: Arc<dyn CompletionProvider>,
}

impl PromptService {
    pub fn new(instruction: impl Into<String>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            instruction: instruction.into(),
            provider,
        }
    }

    /// Reads the instruction file and builds the OpenAI client.
    pub fn load(config: &CompletionConfig) -> Result<Self, StartupError> {
        let instruction = utils::load_instruction(&config.instruction_path)?;
        if instruction.trim().is_empty() {
            warn!(path = %config.instruction_path.display(), "system instruction is empty");
        }
        info!(
            path = %config.instruction_path.display(),
            bytes = instruction.len(),
            "loaded system instruction"
        );

        let provider = OpenAiProvider::new(&config.api_key, &config.base_url, config.timeout)?;
        Ok(Self::new(instruction, Arc::new(provider)))
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Extracts the readable text of `web_page` and completes it.
    pub async fn create_completion(&self, web_page: &str) -> Result<String, ProviderError> {
        let text = extractor::html_to_text(web_page);
        if text.is_empty() {
            warn!(html_bytes = web_page.len(), "no readable text extracted from page");
        }
        self.generate(&text).await
    }

    /// One provider call with the stored instruction and `extracted_text` as input.
    pub async fn generate(&self, extracted_text: &str) -> Result<String, ProviderError> {
        let request = ProviderRequest {
            model: MODEL,
            instructions: &self.instruction,
            input: extracted_text,
            temperature: TEMPERATURE,
        };

        let completion = self.provider.complete(request).await.map_err(|err| {
            warn!(error = %err, "completion failed");
            err
        })?;

        match completion.usage {
            Some(usage) => info!(
                model = MODEL,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total_tokens,
                "completion finished"
            ),
            None => info!(model = MODEL, "completion finished without usage data"),
        }

        Ok(completion.text)
    }
}
