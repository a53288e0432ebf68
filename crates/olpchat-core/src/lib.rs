//! # OLP Chat Core
//!
//! Shared building blocks for the OLP Chat workspace: configuration,
//! the workspace error type, message types, and the `Provider` trait that
//! every external text-generation backend implements.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::OlpChatConfig;
pub use error::{OlpChatError, Result};
