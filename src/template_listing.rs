//! Template listing read projection.

use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::notion_store::{Tag, WorkspaceStore};

/// One listed template. `id` is positional — the 0-based enumeration
/// order of the query result — not a stable store identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateListItem {
    pub id: usize,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateListing {
    pub count: usize,
    pub data: Vec<TemplateListItem>,
}

impl TemplateListing {
    fn empty() -> Self {
        Self {
            count: 0,
            data: Vec::new(),
        }
    }
}

pub struct TemplateQueryService {
    store: Arc<dyn WorkspaceStore>,
}

impl TemplateQueryService {
    pub fn with_store(store: Arc<dyn WorkspaceStore>) -> Self {
        Self { store }
    }

    /// List Template-tagged entries with their bodies.
    ///
    /// Without a store id this short-circuits to an empty listing — no
    /// remote call, not an error. An entry with no content block aborts
    /// the whole listing.
    pub async fn list_templates(&self, store_id: Option<&str>) -> Result<TemplateListing> {
        let Some(store_id) = store_id else {
            return Ok(TemplateListing::empty());
        };

        let entries = self
            .store
            .list_tagged_entries(store_id, Tag::Template)
            .await?;

        let mut data = Vec::with_capacity(entries.len());
        for (id, entry) in entries.into_iter().enumerate() {
            let content = self.store.fetch_entry_body(&entry.id).await?;
            data.push(TemplateListItem {
                id,
                title: entry.title,
                content,
            });
        }

        Ok(TemplateListing {
            count: data.len(),
            data,
        })
    }
}
