//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use olpchat_agent::ChatAgent;
use olpchat_core::config::OlpChatConfig;
use olpchat_knowledge::KnowledgeBase;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<OlpChatConfig>,
    pub knowledge: Arc<KnowledgeBase>,
    /// The chat pipeline — FAQ match, provider chain, fallback.
    pub agent: Arc<ChatAgent>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: OlpChatConfig, knowledge: Arc<KnowledgeBase>, agent: ChatAgent) -> Self {
        Self {
            config: Arc::new(config),
            knowledge,
            agent: Arc::new(agent),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(super::routes::health_check))
        .route("/api/chat", post(super::routes::chat))
        .route("/api/domains", get(super::routes::list_domains))
        .route("/api/faq", get(super::routes::list_faq))
        .route("/api/faq/{topic}", get(super::routes::get_faq_topic))
        .route("/api/suggest", get(super::routes::suggest))
        .route("/api/categories", get(super::routes::list_categories))
        .route("/api/categories/{category}", get(super::routes::get_category))
        .layer(cors_layer(std::env::var("OLPCHAT_CORS_ORIGINS").ok()))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Permissive CORS unless an origin list is given.
///
/// Example: `OLPCHAT_CORS_ORIGINS=https://olp.maryland.gov,https://mdeoe.org`
fn cors_layer(origins: Option<String>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    match origins.filter(|s| !s.trim().is_empty()) {
        Some(origins_str) => {
            let origins: Vec<_> = origins_str
                .split(',')
                .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
                .collect();
            cors.allow_origin(origins)
        }
        // Development fallback — allow all origins
        None => cors.allow_origin(Any),
    }
}

/// Start the HTTP server.
pub async fn start(config: OlpChatConfig, knowledge: Arc<KnowledgeBase>) -> anyhow::Result<()> {
    let agent = ChatAgent::from_config(&config, knowledge.clone())?;
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let service = config.identity.name.clone();

    let app = build_router(AppState::new(config, knowledge, agent));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🌐 {} listening on http://{}", service, addr);

    axum::serve(listener, app).await?;
    Ok(())
}
