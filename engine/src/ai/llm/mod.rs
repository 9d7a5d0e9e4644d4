// FICHIER : engine/src/ai/llm/mod.rs

pub mod client;
pub mod mock;
pub mod prompts;
pub mod response_parser;
pub mod service;

pub use client::LlmClient;
pub use response_parser::{call_structured, StructuredOutput};
pub use service::{LlmRequest, LlmService, OperatorFailure, OperatorResult};
