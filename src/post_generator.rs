//! Batch post generation orchestration.

use std::sync::Arc;

use crate::error::Result;
use crate::llm_client::LlmClient;
use crate::notion_store::{Tag, WorkspaceStore};
use crate::output_parser::{self, PostContent};
use crate::prompts::PromptBuilder;

pub struct PostGenerationService {
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn WorkspaceStore>,
}

impl PostGenerationService {
    pub fn with_clients(llm: Arc<dyn LlmClient>, store: Arc<dyn WorkspaceStore>) -> Self {
        Self { llm, store }
    }

    /// Generate posts from a stored template and persist each one with the
    /// `Working` tag, in model output order. An empty batch is valid.
    ///
    /// Persistence is sequential and best-effort: a store failure partway
    /// leaves the earlier entries in place and surfaces the error. On
    /// success the returned list is the parsed generation output, not a
    /// re-read of the store.
    pub async fn generate_posts(
        &self,
        store_id: &str,
        template_text: &str,
        topics: &str,
        post_count: u32,
    ) -> Result<Vec<PostContent>> {
        let prompt = PromptBuilder::generate_posts(template_text, post_count, topics)?;
        let raw = self.llm.complete(&prompt).await?;
        let posts = output_parser::parse_array(&raw)?;

        for post in &posts {
            self.store
                .create_entry(store_id, &post.title, &post.post, Tag::Working)
                .await?;
        }

        Ok(posts)
    }
}
