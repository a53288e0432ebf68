//! Local stub servers for exercising providers over real HTTP.

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use olpchat_core::config::LlmConfig;

use crate::provider_registry::{ProviderSettings, get_provider_config};

/// What the stub saw on its last request.
#[derive(Debug, Default, Clone)]
pub struct Captured {
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    delay: Duration,
    captured: Arc<Mutex<Captured>>,
}

/// Serve `reply` with `status` on `path`; returns the base URL and the capture slot.
pub async fn spawn_stub(
    path: &str,
    status: StatusCode,
    reply: Value,
    delay: Duration,
) -> (String, Arc<Mutex<Captured>>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let state = StubState {
        status,
        reply,
        delay,
        captured: captured.clone(),
    };

    let app = Router::new()
        .route(path, post(handle))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

async fn handle(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    {
        let mut slot = state.captured.lock().unwrap();
        slot.body = serde_json::from_str(&body).ok();
        slot.headers = headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
    }
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.reply.to_string())
}

/// Resolve a registry entry and point it at a stub server.
pub fn settings_for(name: &str, base_url: &str, llm: &LlmConfig) -> ProviderSettings {
    let mut settings = ProviderSettings::resolve(get_provider_config(name).unwrap(), llm);
    settings.base_url = base_url.to_string();
    settings
}
