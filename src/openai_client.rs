//! OpenAI chat-completions client.
//!
//! One blocking-style call per `complete`: the prompt goes out as a single
//! user message with `temperature: 0` to keep the output format stable.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::llm_client::LlmClient;

pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client for one request's credentials and model choice.
    pub fn new(config: &AppConfig, api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: config.openai_base_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn content_from_response(body: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct Message {
            content: String,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let response: ApiResponse = serde_json::from_str(body)
            .map_err(|e| Error::Generation(format!("unexpected completion response: {e}")))?;
        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Generation("completion returned no choices".to_string()))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": 0
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "completion API error {status}: {body}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;
        let preview: String = text.chars().take(400).collect();
        tracing::debug!("completion raw response: {preview}");

        Self::content_from_response(&text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
