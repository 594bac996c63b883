use crate::errors::Error;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod anthropic;
pub mod deepseek;
pub mod ollama;
pub mod openai;

/// A single-shot text completion backend. Stateless between calls, no
/// streaming, no internal retries.
#[async_trait]
pub trait GenerationBackend: Debug + Send + Sync {
    /// Completes `prompt` under the behavior set by `system` and returns the
    /// generated text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, Error>;
}
