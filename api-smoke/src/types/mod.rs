//! Contains data structures for requests and responses exchanged with the server under test.
//!
//! The chat payloads follow the OpenAI chat completions contract, the generate
//! payloads follow Ollama's `/api/generate`, and the health payload is whatever
//! JSON the server reports.

pub mod chat;
pub mod generate;
pub mod health;
mod http;
mod shared;

pub use http::*;
pub use shared::*;
