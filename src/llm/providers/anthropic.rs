use super::GenerationBackend;
use crate::errors::Error;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

/// Backend implementation for Anthropic's API
#[derive(Debug)]
pub struct AnthropicBackend {
    /// Anthropic API key loaded from environment
    api_key: String,
    /// Model identifier to use (e.g. "claude-sonnet-4-5")
    model: String,
}

impl AnthropicBackend {
    /// Creates a new Anthropic backend instance
    ///
    /// # Arguments
    /// * `model` - The model identifier to use
    ///
    /// # Returns
    /// * `Result<Self, Error>` - Backend instance or error if API key not found
    pub fn new(model: &str) -> Result<Self, Error> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| Error::Config("ANTHROPIC_API_KEY environment variable not set".into()))?;
        Ok(AnthropicBackend {
            api_key,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl GenerationBackend for AnthropicBackend {
    /// Calls Anthropic's messages API with the system text carried separately
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, Error> {
        let client = Client::new();

        let request_body = json!({
            "model": self.model,
            "system": system,
            "max_tokens": 4096,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let res = client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", self.api_key.to_string())
            .header("anthropic-version", "2023-06-01")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Anthropic request failed: {}", e)))?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("Anthropic API error: {}", text)));
        }

        let json_resp: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Anthropic response not JSON: {}", e)))?;
        if let Some(content) = json_resp["content"][0]["text"].as_str() {
            debug!("Anthropic response: {}", content);
            Ok(content.trim().to_string())
        } else {
            Err(Error::Generation("No content in Anthropic response".into()))
        }
    }
}
