//! LLM chat provider for the Gaia assistant.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;

use crate::settings::{AiBuddySettings, DEFAULT_AI_BASE_URL, DEFAULT_AI_MODEL};

/// One role-tagged message on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the full message list and return the model's reply text.
    async fn chat(&self, messages: &[Message]) -> Result<String>;
}

/// Talks to an Ollama-style chat endpoint (`POST {base}/api/chat`).
pub struct OllamaProvider {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(settings: &AiBuddySettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_default();
        let base_url = if settings.base_url.trim().is_empty() {
            DEFAULT_AI_BASE_URL.to_string()
        } else {
            settings.base_url.clone()
        };
        let model = if settings.model.trim().is_empty() {
            DEFAULT_AI_MODEL.to_string()
        } else {
            settings.model.clone()
        };
        Self {
            api_key: settings.api_key.clone(),
            base_url,
            model,
            client,
        }
    }

    async fn make_request(&self, messages: &[Message]) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        let mut req = self
            .client
            .post(chat_endpoint(&self.base_url))
            .header("Content-Type", "application/json");
        if !self.api_key.trim().is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let resp = req.json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("chat API request failed (status={}): {}", status, body));
        }

        let result: serde_json::Value = resp.json().await?;
        Ok(result["message"]["content"].as_str().unwrap_or("").to_string())
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        self.make_request(messages).await
    }
}

/// Append `/api/chat` to the base URL, or just `/chat` when the base
/// already ends in `/api`. Trailing slashes are trimmed first.
fn chat_endpoint(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    if base.ends_with("/api") {
        format!("{base}/chat")
    } else {
        format!("{base}/api/chat")
    }
}
