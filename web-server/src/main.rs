//! HTTP transport for the templating pipeline.
//!
//! Three operations, all POST, all carrying caller-supplied credentials:
//! `/create_template`, `/get_templates`, `/generate_posts`. The handlers
//! build per-request clients from those credentials and delegate to the
//! core services — no pipeline logic lives here.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use smgpt::{
    AppConfig, NotionStore, OpenAiClient, PostContent, PostGenerationService, TemplateListing,
    TemplateQueryService, TemplateService,
};

// Application state
#[derive(Clone)]
struct AppState {
    config: Arc<AppConfig>,
}

// API types
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTemplateRequest {
    notion_key: String,
    openai_key: String,
    text: String,
    model: String,
    #[serde(default)]
    database_id: Option<String>,
    #[serde(default)]
    page_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetTemplatesRequest {
    notion_key: String,
    #[serde(default)]
    database_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePostsRequest {
    notion_key: String,
    openai_key: String,
    database_id: String,
    template_text: String,
    num_posts: u32,
    model: String,
    topics: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTemplateResponse {
    title: String,
    post: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_id: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn error_response(err: smgpt::Error) -> ErrorResponse {
    use smgpt::Error;

    let status = match &err {
        Error::MissingBinding { .. } | Error::MalformedOutput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Error::Generation(_) | Error::Store { .. } | Error::EntryBodyMissing { .. } => {
            StatusCode::BAD_GATEWAY
        }
    };
    warn!("request failed: {err}");
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "smgpt_web_server=info,tower_http=debug".to_string()),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Arc::new(AppConfig::from_env());
    let addr = format!("0.0.0.0:{}", config.port);

    let app = create_router(AppState { config });

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/create_template", post(create_template))
        .route("/get_templates", post(get_templates))
        .route("/generate_posts", post(generate_posts))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"success": true, "data": "OK"}))
}

async fn create_template(
    State(state): State<AppState>,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<Json<CreateTemplateResponse>, ErrorResponse> {
    let llm = Arc::new(OpenAiClient::new(&state.config, req.openai_key, req.model));
    let store = Arc::new(NotionStore::new(&state.config, req.notion_key));
    let service =
        TemplateService::with_clients(llm, store, state.config.store_display_title.clone());

    let created = service
        .create_template(&req.text, req.database_id.as_deref(), req.page_id.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(CreateTemplateResponse {
        title: created.title,
        post: created.post,
        database_id: created.store_id,
    }))
}

async fn get_templates(
    State(state): State<AppState>,
    Json(req): Json<GetTemplatesRequest>,
) -> Result<Json<TemplateListing>, ErrorResponse> {
    let store = Arc::new(NotionStore::new(&state.config, req.notion_key));
    let service = TemplateQueryService::with_store(store);

    let listing = service
        .list_templates(req.database_id.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(listing))
}

async fn generate_posts(
    State(state): State<AppState>,
    Json(req): Json<GeneratePostsRequest>,
) -> Result<Json<Vec<PostContent>>, ErrorResponse> {
    let llm = Arc::new(OpenAiClient::new(&state.config, req.openai_key, req.model));
    let store = Arc::new(NotionStore::new(&state.config, req.notion_key));
    let service = PostGenerationService::with_clients(llm, store);

    let posts = service
        .generate_posts(&req.database_id, &req.template_text, &req.topics, req.num_posts)
        .await
        .map_err(error_response)?;

    Ok(Json(posts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_deserialize_from_camel_case() {
        let req: CreateTemplateRequest = serde_json::from_str(
            r#"{"notionKey":"nk","openaiKey":"ok","text":"post","model":"gpt-4o","pageId":"page1"}"#,
        )
        .unwrap();
        assert_eq!(req.notion_key, "nk");
        assert_eq!(req.page_id.as_deref(), Some("page1"));
        assert_eq!(req.database_id, None);

        let req: GeneratePostsRequest = serde_json::from_str(
            r#"{"notionKey":"nk","openaiKey":"ok","databaseId":"db","templateText":"t","numPosts":2,"model":"m","topics":"rust"}"#,
        )
        .unwrap();
        assert_eq!(req.num_posts, 2);
        assert_eq!(req.template_text, "t");
    }

    #[test]
    fn create_response_omits_absent_database_id() {
        let body = serde_json::to_string(&CreateTemplateResponse {
            title: "T".to_string(),
            post: "P".to_string(),
            database_id: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"title":"T","post":"P"}"#);

        let body = serde_json::to_string(&CreateTemplateResponse {
            title: "T".to_string(),
            post: "P".to_string(),
            database_id: Some("db".to_string()),
        })
        .unwrap();
        assert!(body.contains(r#""databaseId":"db""#));
    }
}
