//! Notion-backed workspace store.
//!
//! The store is one Notion database with a two-field schema: a `Title`
//! title property and a `Status` single-select with the closed option set
//! {Template, Working, Done}. Entries are pages carrying a single
//! paragraph block as their body.
//!
//! Every remote failure surfaces as [`Error::Store`] naming the Notion
//! operation that failed. There is no retry and no rollback — callers
//! treat multi-entry writes as best-effort.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::{Error, Result};

/// Status tag carried by every entry in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Template,
    Working,
    Done,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Template => "Template",
            Tag::Working => "Working",
            Tag::Done => "Done",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw entry returned from a store query: the native page id plus title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub id: String,
    pub title: String,
}

/// Persistence boundary for templates and generated posts.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Return `existing` unchanged when present (no remote call);
    /// otherwise provision a new store under `parent_page_id` and return
    /// its id. At most one creation call per invocation.
    async fn ensure_store(
        &self,
        existing: Option<&str>,
        parent_page_id: Option<&str>,
        display_title: &str,
    ) -> Result<String>;

    /// Entries whose `Status` select equals `tag`, in whatever order the
    /// backing system returns them.
    async fn list_tagged_entries(&self, store_id: &str, tag: Tag) -> Result<Vec<StoreEntry>>;

    /// The first paragraph block of an entry.
    async fn fetch_entry_body(&self, entry_id: &str) -> Result<String>;

    /// Create one entry with a title, a single paragraph body and a tag.
    /// Returns the new entry id.
    async fn create_entry(
        &self,
        store_id: &str,
        title: &str,
        body: &str,
        tag: Tag,
    ) -> Result<String>;
}

pub struct NotionStore {
    token: String,
    base_url: String,
    notion_version: String,
    client: reqwest::Client,
}

impl NotionStore {
    /// Create a store client for one request's bearer token.
    pub fn new(config: &AppConfig, token: String) -> Self {
        Self {
            token,
            base_url: config.notion_base_url.clone(),
            notion_version: config.notion_version.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn request(
        &self,
        operation: &'static str,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", &self.notion_version);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::store(operation, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::store(operation, e))?;

        if !status.is_success() {
            return Err(Error::Store {
                operation,
                message: format!("HTTP {status}: {text}"),
            });
        }

        tracing::debug!("{operation} returned {} bytes", text.len());
        serde_json::from_str(&text).map_err(|e| Error::store(operation, e))
    }
}

#[async_trait]
impl WorkspaceStore for NotionStore {
    async fn ensure_store(
        &self,
        existing: Option<&str>,
        parent_page_id: Option<&str>,
        display_title: &str,
    ) -> Result<String> {
        if let Some(id) = existing {
            return Ok(id.to_string());
        }

        let parent_page_id = parent_page_id.ok_or_else(|| Error::Store {
            operation: "databases.create",
            message: "no parent page id supplied for store creation".to_string(),
        })?;

        let payload = store_creation_payload(parent_page_id, display_title);
        let response = self
            .request("databases.create", reqwest::Method::POST, "/databases", Some(&payload))
            .await?;

        id_of(&response).ok_or_else(|| Error::Store {
            operation: "databases.create",
            message: "response carried no database id".to_string(),
        })
    }

    async fn list_tagged_entries(&self, store_id: &str, tag: Tag) -> Result<Vec<StoreEntry>> {
        let response = self
            .request(
                "databases.query",
                reqwest::Method::POST,
                &format!("/databases/{store_id}/query"),
                Some(&query_payload(tag)),
            )
            .await?;

        let results = response
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::Store {
                operation: "databases.query",
                message: "response carried no results array".to_string(),
            })?;

        results
            .iter()
            .map(|page| {
                entry_from_page(page).ok_or_else(|| Error::Store {
                    operation: "databases.query",
                    message: "result entry had no readable title".to_string(),
                })
            })
            .collect()
    }

    async fn fetch_entry_body(&self, entry_id: &str) -> Result<String> {
        let response = self
            .request(
                "blocks.children.list",
                reqwest::Method::GET,
                &format!("/blocks/{entry_id}/children"),
                None,
            )
            .await?;

        body_from_blocks(&response).ok_or_else(|| Error::EntryBodyMissing {
            entry_id: entry_id.to_string(),
        })
    }

    async fn create_entry(
        &self,
        store_id: &str,
        title: &str,
        body: &str,
        tag: Tag,
    ) -> Result<String> {
        let payload = entry_payload(store_id, title, body, tag);
        let response = self
            .request("pages.create", reqwest::Method::POST, "/pages", Some(&payload))
            .await?;

        id_of(&response).ok_or_else(|| Error::Store {
            operation: "pages.create",
            message: "response carried no page id".to_string(),
        })
    }
}

fn id_of(response: &Value) -> Option<String> {
    response.get("id").and_then(Value::as_str).map(str::to_string)
}

/// Creation payload for a fresh store: inline database under the parent
/// page with the Title/Status schema.
fn store_creation_payload(parent_page_id: &str, display_title: &str) -> Value {
    json!({
        "parent": {"type": "page_id", "page_id": parent_page_id},
        "title": [{"type": "text", "text": {"content": display_title}}],
        "icon": {"type": "emoji", "emoji": "🤖"},
        "is_inline": true,
        "properties": {
            "Title": {"title": {}},
            "Status": {
                "select": {
                    "options": [
                        {"name": "Template", "color": "blue"},
                        {"name": "Working", "color": "yellow"},
                        {"name": "Done", "color": "red"}
                    ]
                }
            }
        }
    })
}

fn query_payload(tag: Tag) -> Value {
    json!({
        "filter": {
            "property": "Status",
            "select": {"equals": tag.as_str()}
        }
    })
}

fn entry_payload(store_id: &str, title: &str, body: &str, tag: Tag) -> Value {
    json!({
        "parent": {"database_id": store_id},
        "properties": {
            "Title": {"title": [{"type": "text", "text": {"content": title}}]},
            "Status": {"select": {"name": tag.as_str()}}
        },
        "children": [{
            "object": "block",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{"type": "text", "text": {"content": body}}]
            }
        }]
    })
}

fn entry_from_page(page: &Value) -> Option<StoreEntry> {
    let id = page.get("id")?.as_str()?.to_string();
    let title_items = page
        .pointer("/properties/Title/title")
        .or_else(|| page.pointer("/properties/title/title"))?;
    let title = title_items
        .pointer("/0/text/content")
        .or_else(|| title_items.pointer("/0/plain_text"))?
        .as_str()?
        .to_string();
    Some(StoreEntry { id, title })
}

fn body_from_blocks(payload: &Value) -> Option<String> {
    payload
        .pointer("/results/0/paragraph/rich_text/0/text/content")
        .or_else(|| payload.pointer("/results/0/paragraph/rich_text/0/plain_text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_set_is_closed() {
        assert_eq!(Tag::Template.as_str(), "Template");
        assert_eq!(Tag::Working.as_str(), "Working");
        assert_eq!(Tag::Done.as_str(), "Done");
    }

    #[test]
    fn store_creation_payload_matches_schema() {
        let payload = store_creation_payload("page1", "My store");
        assert_eq!(payload["parent"]["page_id"], "page1");
        assert_eq!(payload["is_inline"], true);
        assert_eq!(payload["title"][0]["text"]["content"], "My store");
        let options = payload["properties"]["Status"]["select"]["options"]
            .as_array()
            .unwrap();
        let names: Vec<&str> = options
            .iter()
            .map(|o| o["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Template", "Working", "Done"]);
    }

    #[test]
    fn query_payload_filters_on_status() {
        let payload = query_payload(Tag::Template);
        assert_eq!(payload["filter"]["property"], "Status");
        assert_eq!(payload["filter"]["select"]["equals"], "Template");
    }

    #[test]
    fn entry_payload_carries_title_body_and_tag() {
        let payload = entry_payload("db1", "A title", "A body", Tag::Working);
        assert_eq!(payload["parent"]["database_id"], "db1");
        assert_eq!(
            payload["properties"]["Title"]["title"][0]["text"]["content"],
            "A title"
        );
        assert_eq!(payload["properties"]["Status"]["select"]["name"], "Working");
        assert_eq!(
            payload["children"][0]["paragraph"]["rich_text"][0]["text"]["content"],
            "A body"
        );
    }

    #[test]
    fn entry_projection_reads_id_and_title() {
        let page = json!({
            "id": "page-123",
            "properties": {
                "Title": {
                    "title": [{"type": "text", "text": {"content": "Hook template"}}]
                }
            }
        });
        let entry = entry_from_page(&page).unwrap();
        assert_eq!(entry.id, "page-123");
        assert_eq!(entry.title, "Hook template");
    }

    #[test]
    fn entry_projection_rejects_title_less_pages() {
        assert!(entry_from_page(&json!({"id": "page-123", "properties": {}})).is_none());
    }

    #[test]
    fn body_projection_reads_first_paragraph() {
        let blocks = json!({
            "results": [{
                "paragraph": {
                    "rich_text": [{"type": "text", "text": {"content": "The [x] is [y]"}}]
                }
            }]
        });
        assert_eq!(body_from_blocks(&blocks).unwrap(), "The [x] is [y]");
    }

    #[test]
    fn body_projection_fails_on_empty_blocks() {
        assert!(body_from_blocks(&json!({"results": []})).is_none());
    }

    #[tokio::test]
    async fn ensure_store_with_existing_id_returns_it_without_network() {
        // base_url is unroutable, so any remote call would error out.
        let config = AppConfig {
            notion_base_url: "http://127.0.0.1:0".to_string(),
            ..AppConfig::default()
        };
        let store = NotionStore::new(&config, "secret".to_string());
        let id = store
            .ensure_store(Some("X"), Some("page1"), "title")
            .await
            .unwrap();
        assert_eq!(id, "X");
    }

    #[tokio::test]
    async fn ensure_store_without_parent_page_fails_before_any_call() {
        let config = AppConfig {
            notion_base_url: "http://127.0.0.1:0".to_string(),
            ..AppConfig::default()
        };
        let store = NotionStore::new(&config, "secret".to_string());
        let err = store.ensure_store(None, None, "title").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Store {
                operation: "databases.create",
                ..
            }
        ));
    }
}
