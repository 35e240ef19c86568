//! Process-wide configuration.
//!
//! Built once at startup and passed by reference into client constructors.
//! Core logic never reads the environment itself — endpoints and defaults
//! always arrive through this struct.

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_NOTION_BASE_URL: &str = "https://api.notion.com/v1";
const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Display title used when provisioning a fresh store.
pub const DEFAULT_STORE_TITLE: &str = "LinkedIn Posts (Powered by SocialMediaGPT)";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_base_url: String,
    pub notion_base_url: String,
    pub notion_version: String,
    pub store_display_title: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            notion_base_url: DEFAULT_NOTION_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            store_display_title: DEFAULT_STORE_TITLE.to_string(),
            port: 8000,
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or(defaults.openai_base_url),
            notion_base_url: std::env::var("NOTION_BASE_URL")
                .unwrap_or(defaults.notion_base_url),
            notion_version: std::env::var("NOTION_VERSION").unwrap_or(defaults.notion_version),
            store_display_title: std::env::var("STORE_TITLE")
                .unwrap_or(defaults.store_display_title),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}
