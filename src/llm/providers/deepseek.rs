use super::GenerationBackend;
use crate::errors::Error;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Backend implementation for DeepSeek's API
#[derive(Debug)]
pub struct DeepSeekBackend {
    /// API key loaded from environment
    api_key: String,
    /// Model identifier to use (e.g. "deepseek-chat")
    model: String,
}

impl DeepSeekBackend {
    /// Creates a new DeepSeek backend instance
    ///
    /// # Arguments
    /// * `model` - The model identifier to use
    ///
    /// # Returns
    /// * `Result<Self, Error>` - Backend instance or error if API key not found
    pub fn new(model: &str) -> Result<Self, Error> {
        let api_key = std::env::var("DEEPSEEK_API_KEY")
            .map_err(|_| Error::Config("DEEPSEEK_API_KEY environment variable not set".into()))?;
        Ok(DeepSeekBackend {
            api_key,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl GenerationBackend for DeepSeekBackend {
    /// Calls DeepSeek's chat completions API
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, Error> {
        let client = Client::new();
        let request_body = json!({
          "model": self.model,
          "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": prompt }
          ],
          "temperature": 0.0,
          "stream": false
        });

        let res = client
            .post("https://api.deepseek.com/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("DeepSeek request failed: {}", e)))?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("DeepSeek API error: {}", text)));
        }

        let json_resp: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::Generation(format!("DeepSeek response not JSON: {}", e)))?;
        if let Some(content) = json_resp["choices"][0]["message"]["content"].as_str() {
            Ok(content.trim().to_string())
        } else {
            Err(Error::Generation("No content in DeepSeek response".into()))
        }
    }
}
