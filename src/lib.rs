//! LinkedIn post templating and generation pipeline
//!
//! Turns sample LinkedIn posts into reusable templates with an LLM and
//! persists templates and generated posts into a Notion database. The HTTP
//! transport lives in the sibling `web-server` crate; this crate owns the
//! orchestration only.
//!
//! ## Pipeline
//!
//! ```text
//! request → PromptBuilder → LlmClient → output_parser → WorkspaceStore
//! ```

// External service clients
pub mod llm_client;
pub mod notion_store;
pub mod openai_client;

// Pure building blocks
pub mod output_parser;
pub mod prompts;

// Orchestration services
pub mod post_generator;
pub mod template_listing;
pub mod template_service;

pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::AppConfig;
pub use error::{Error, Result};
pub use llm_client::LlmClient;
pub use notion_store::{NotionStore, StoreEntry, Tag, WorkspaceStore};
pub use openai_client::OpenAiClient;
pub use output_parser::PostContent;
pub use post_generator::PostGenerationService;
pub use template_listing::{TemplateListItem, TemplateListing, TemplateQueryService};
pub use template_service::{CreatedTemplate, TemplateService};
