//! AI Pops - developer/ticket matching backed by a text-generation API
//!
//! Requests are turned into prompts for an external completion service and the
//! replies are parsed as JSON. Whenever the service fails or replies with
//! something unusable, a deterministic fallback answers instead.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{strip_code_fences, GatewayError, MatchingGateway};
pub use models::{Assignment, Developer, MatchRequest, Ticket};
pub use services::{CompletionError, CompletionRequest, CompletionService, OpenAiClient};
