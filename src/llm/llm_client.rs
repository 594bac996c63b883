use crate::errors::Error;
use crate::llm::providers::GenerationBackend;
use tracing::debug;

/// Generic generation client that delegates work to a concrete backend.
#[derive(Debug)]
pub struct LlmClient {
    backend: Box<dyn GenerationBackend>,
}

impl LlmClient {
    /// Creates a new client with the specified backend and model.
    ///
    /// # Arguments
    /// * `provider_name` - Name of the backend ("openai", "anthropic", "ollama" or "deepseek")
    /// * `model` - Model name to use with the backend
    ///
    /// # Returns
    /// * `Result<LlmClient, Error>` - New client instance or error
    pub fn new(provider_name: &str, model: &str) -> Result<Self, Error> {
        let backend: Box<dyn GenerationBackend> = match provider_name {
            "openai" => Box::new(crate::llm::providers::openai::OpenAiBackend::new(model)?),
            "anthropic" => Box::new(crate::llm::providers::anthropic::AnthropicBackend::new(
                model,
            )?),
            "ollama" => Box::new(crate::llm::providers::ollama::OllamaBackend::new(model)?),
            "deepseek" => Box::new(crate::llm::providers::deepseek::DeepSeekBackend::new(model)?),
            _ => {
                return Err(Error::Config(format!(
                    "Unknown provider '{}'",
                    provider_name
                )))
            }
        };

        Ok(LlmClient { backend })
    }

    /// Wraps an already constructed backend.
    pub fn from_backend(backend: Box<dyn GenerationBackend>) -> Self {
        LlmClient { backend }
    }

    /// Performs one completion call and rejects unusable (empty) output.
    ///
    /// # Arguments
    /// * `system` - System prompt to set context/behavior
    /// * `prompt` - The assembled user prompt
    ///
    /// # Returns
    /// * `Result<String, Error>` - Completion text or a generation error
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, Error> {
        let text = self.backend.complete(system, prompt).await?;
        debug!("completion: {}", text);
        if text.trim().is_empty() {
            return Err(Error::Generation("backend returned empty text".into()));
        }
        Ok(text)
    }
}
