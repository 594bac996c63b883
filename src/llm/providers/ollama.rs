use super::GenerationBackend;
use crate::errors::Error;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Backend implementation for Ollama's local API
#[derive(Debug)]
pub struct OllamaBackend {
    /// Model identifier to use (e.g. "llama3", "sqlcoder")
    model: String,
}

impl OllamaBackend {
    /// Creates a new Ollama backend instance
    ///
    /// # Arguments
    /// * `model` - The model identifier to use
    pub fn new(model: &str) -> Result<Self, Error> {
        Ok(OllamaBackend {
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    /// Calls Ollama's chat API
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, Error> {
        let client = Client::new();

        let request_body = json!({
            "model": self.model,
            "stream": false,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt }
            ]
        });

        let res = client
            .post("http://localhost:11434/api/chat")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Ollama request failed: {}", e)))?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("Ollama API error: {}", text)));
        }

        let json_resp: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Ollama response not JSON: {}", e)))?;
        if let Some(content) = json_resp["message"]["content"].as_str() {
            Ok(content.trim().to_string())
        } else {
            Err(Error::Generation("No content in Ollama response".into()))
        }
    }
}
