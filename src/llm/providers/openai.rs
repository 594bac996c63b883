use super::GenerationBackend;
use crate::errors::Error;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Backend implementation for OpenAI's API
#[derive(Debug)]
pub struct OpenAiBackend {
    /// OpenAI API key loaded from environment
    api_key: String,
    /// Model identifier to use (e.g. "gpt-4o", "gpt-4.1-mini")
    model: String,
}

impl OpenAiBackend {
    /// Creates a new OpenAI backend instance
    ///
    /// # Arguments
    /// * `model` - The model identifier to use
    ///
    /// # Returns
    /// * `Result<Self, Error>` - Backend instance or error if API key not found
    pub fn new(model: &str) -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Config("OPENAI_API_KEY environment variable not set".into()))?;
        Ok(OpenAiBackend {
            api_key,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    /// Calls OpenAI's chat completions API with a system and a user message
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, Error> {
        let client = Client::new();
        let request_body = json!({
          "model": self.model,
          "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": prompt }
          ],
          "temperature": 0.0
        });

        let res = client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("OpenAI request failed: {}", e)))?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("OpenAI API error: {}", text)));
        }

        let json_resp: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::Generation(format!("OpenAI response not JSON: {}", e)))?;
        if let Some(content) = json_resp["choices"][0]["message"]["content"].as_str() {
            Ok(content.trim().to_string())
        } else {
            Err(Error::Generation("No content in OpenAI response".into()))
        }
    }
}
