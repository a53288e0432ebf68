//! # OLP Chat Gateway
//!
//! Axum HTTP API in front of the chat agent and knowledge base.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
