//! Template creation orchestration.
//!
//! NeedStore → HaveStore → Generated → Persisted: provision the store if
//! the caller did not name one, templatize the sample post through the
//! LLM, then persist the parsed template with the `Template` tag. Any
//! failure aborts the request; nothing already written is rolled back.

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::llm_client::LlmClient;
use crate::notion_store::{Tag, WorkspaceStore};
use crate::output_parser;
use crate::prompts::PromptBuilder;

/// Result of templatizing one sample post. `store_id` is present only
/// when the store was provisioned during this request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedTemplate {
    pub title: String,
    pub post: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

pub struct TemplateService {
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn WorkspaceStore>,
    store_display_title: String,
}

impl TemplateService {
    pub fn with_clients(
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn WorkspaceStore>,
        store_display_title: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            store,
            store_display_title: store_display_title.into(),
        }
    }

    /// Turn one sample post into a stored template.
    pub async fn create_template(
        &self,
        sample_text: &str,
        store_id: Option<&str>,
        parent_page_id: Option<&str>,
    ) -> Result<CreatedTemplate> {
        let newly_provisioned = store_id.is_none();
        let store_id = self
            .store
            .ensure_store(store_id, parent_page_id, &self.store_display_title)
            .await?;

        let prompt = PromptBuilder::templatize(sample_text)?;
        let raw = self.llm.complete(&prompt).await?;
        let template = output_parser::parse_object(&raw)?;

        self.store
            .create_entry(&store_id, &template.title, &template.post, Tag::Template)
            .await?;

        Ok(CreatedTemplate {
            title: template.title,
            post: template.post,
            store_id: newly_provisioned.then_some(store_id),
        })
    }
}
