//! In-process [`CompletionProvider`] for tests: answers without the network
//! and records every call it receives.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::completion::{Completion, CompletionProvider, ProviderRequest, Usage};
use crate::error::ProviderError;

#[derive(Debug, Clone)]
pub enum StubReply {
    /// Returns the input text unchanged.
    Echo,
    Text(String),
    Fail(ProviderError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub model: String,
    pub instructions: String,
    pub input: String,
    pub temperature: f32,
}

pub struct StubProvider {
    default: StubReply,
    queued: Mutex<VecDeque<StubReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubProvider {
    pub fn new(default: StubReply) -> Self {
        Self {
            default,
            queued: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::new(StubReply::Echo)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(StubReply::Text(text.into()))
    }

    pub fn failing(err: ProviderError) -> Self {
        Self::new(StubReply::Fail(err))
    }

    /// Queues a one-shot reply used before falling back to the default.
    pub fn then(self, reply: StubReply) -> Self {
        lock(&self.queued).push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, request: ProviderRequest<'_>) -> Result<Completion, ProviderError> {
        lock(&self.calls).push(RecordedCall {
            model: request.model.to_string(),
            instructions: request.instructions.to_string(),
            input: request.input.to_string(),
            temperature: request.temperature,
        });

        let reply = lock(&self.queued)
            .pop_front()
            .unwrap_or_else(|| self.default.clone());

        let text = match reply {
            StubReply::Echo => request.input.to_string(),
            StubReply::Text(text) => text,
            StubReply::Fail(err) => return Err(err),
        };

        let input_tokens = request.input.split_whitespace().count() as u64;
        let output_tokens = text.split_whitespace().count() as u64;

        Ok(Completion {
            text,
            usage: Some(Usage {
                input_tokens,
                output_tokens,
                total_tokens: input_tokens + output_tokens,
            }),
        })
    }
}
