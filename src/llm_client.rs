//! Generation-client trait seam.

use async_trait::async_trait;

use crate::error::Result;

/// A single-shot text-generation client.
///
/// Implementations are constructed per request from caller-supplied
/// credentials and a model name. `complete` performs exactly one call —
/// no retries, no streaming — and returns the full response text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    fn model_name(&self) -> &str;
}
