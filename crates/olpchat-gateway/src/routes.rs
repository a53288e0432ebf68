//! API route handlers for the gateway.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use olpchat_knowledge::suggest::DEFAULT_SUGGESTION_LIMIT;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::server::AppState;

type ApiResponse = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ApiResponse {
    (status, Json(json!({ "error": message })))
}

/// Health check with LLM mode and which API keys are present.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let llm = &state.config.llm;
    Json(json!({
        "status": "healthy",
        "service": state.config.identity.name,
        "version": env!("CARGO_PKG_VERSION"),
        "llm_mode": llm.mode.as_str(),
        "ollama_model": llm.mode.uses_ollama().then_some(llm.ollama_model.as_str()),
        "has_openrouter": !llm.openrouter_api_key.is_empty(),
        "has_anthropic": !llm.anthropic_api_key.is_empty(),
        "has_openai": !llm.openai_api_key.is_empty(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// Main chat endpoint — `{"message": "..."}` in, response envelope out.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let message = match &body {
        Ok(Json(v)) => v.get("message").and_then(Value::as_str),
        Err(rejection) => {
            tracing::debug!("rejected chat body: {rejection}");
            None
        }
    };
    let Some(message) = message else {
        return error(StatusCode::BAD_REQUEST, "Message required");
    };

    let response = state.agent.respond(message).await;
    (StatusCode::OK, Json(json!(response)))
}

/// The five domains of action.
pub async fn list_domains(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "domains": state.knowledge.domains() }))
}

/// Every topic key with its category, table order.
pub async fn list_faq(State(state): State<Arc<AppState>>) -> Json<Value> {
    let topics: Vec<Value> = state
        .knowledge
        .topics()
        .into_iter()
        .map(|(topic, category)| json!({ "topic": topic, "category": category }))
        .collect();
    Json(json!({ "topics": topics }))
}

/// One FAQ record by URL segment (`green-school`, `what-is-mwee`).
pub async fn get_faq_topic(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> ApiResponse {
    match state.knowledge.lookup_path_topic(&topic) {
        Some(record) => (StatusCode::OK, Json(json!(record))),
        None => error(StatusCode::NOT_FOUND, "Topic not found"),
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

/// Topic suggestions for a partial query.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Json<Value> {
    let suggestions = state.knowledge.suggest(&params.q, DEFAULT_SUGGESTION_LIMIT);
    Json(json!({ "suggestions": suggestions }))
}

pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "categories": state.knowledge.categories() }))
}

/// All records in one category.
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> ApiResponse {
    let category = category.trim().to_lowercase();
    let faqs = state.knowledge.by_category(&category);
    if faqs.is_empty() {
        return error(StatusCode::NOT_FOUND, "Category not found");
    }
    (StatusCode::OK, Json(json!({ "category": category, "faqs": faqs })))
}
