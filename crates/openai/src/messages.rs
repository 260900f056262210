//! Chat-completions wire types.
//!
//! The endpoint accepts JSON of the shape
//! `{"model": …, "messages": [{"role": "user", "content": [parts…]}],
//! "max_completion_tokens": …}` where each content part is tagged with a
//! `"type"` field. This module models exactly the subset the workbench
//! sends and reads back.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Instruction sent alongside every image.
pub const CAPTION_PROMPT: &str =
    "Caption this image in a single, detailed, and concise sentence.";

/// Completion budget for a single caption.
pub const MAX_COMPLETION_TOKENS: u32 = 4096;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Top-level chat-completions request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_completion_tokens: u32,
}

/// A single chat message with multi-part content.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: Vec<ContentPart>,
}

/// One part of a multi-modal message, tagged via the `"type"` field.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Image reference carried as a data URL.
#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Encode raw image bytes as the `data:` URL the endpoint expects.
pub fn image_data_url(bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:image/jpeg;base64,{encoded}")
}

/// Build the single-image caption request payload.
pub fn caption_request(model: &str, image_bytes: &[u8]) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: CAPTION_PROMPT.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_data_url(image_bytes),
                    },
                },
            ],
        }],
        max_completion_tokens: MAX_COMPLETION_TOKENS,
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Chat-completions response; only the fields the workbench reads.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
