//! REST client for the OpenAI chat-completions vision endpoint.
//!
//! Provides typed request/response payloads and a thin [`reqwest`]
//! wrapper that captions a single image per call. Stateless: every call
//! is an independent round trip and no retries are performed here.

pub mod api;
pub mod messages;

pub use api::{OpenAiApi, OpenAiApiError};
