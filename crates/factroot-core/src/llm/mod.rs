//! LLM integration
//!
//! Provides the fallback predictor trait and an implementation backed by an
//! external OpenAI-compatible service (vLLM, OpenAI, etc.).

mod client;
mod http_predictor;
mod traits;

pub use client::{ChatMessage, LLMClient, VLLMClient};
pub use http_predictor::HttpPredictor;
pub use traits::*;
