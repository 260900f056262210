//! HTTP client for the chat-completions endpoint.
//!
//! One captioning call is one `POST /chat/completions` round trip with a
//! 60-second timeout. Retry policy, if any, belongs to the caller.

use std::time::Duration;

use crate::messages::{caption_request, ChatResponse};

/// Default base URL of the OpenAI REST API.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Hard timeout for a single caption request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Vision captioning client.
pub struct OpenAiApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the captioning REST layer.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiApiError {
    /// The endpoint rejected the API key (401/403).
    #[error("OpenAI API Error: {body}")]
    Auth { status: u16, body: String },

    /// The endpoint returned any other non-2xx status.
    #[error("OpenAI API Error: {body}")]
    Api { status: u16, body: String },

    /// The HTTP request itself failed (connect, TLS, timeout, decode).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A 2xx response that carried no caption choices.
    #[error("OpenAI response contained no caption")]
    MissingContent,
}

impl OpenAiApi {
    /// Create a client for the given base URL (e.g. [`DEFAULT_API_URL`]).
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// HTTP base URL this client targets.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Caption a single image.
    ///
    /// Sends the fixed captioning prompt plus the image as a base64 data
    /// URL and returns the first choice's message content.
    pub async fn caption_image(
        &self,
        api_key: &str,
        model: &str,
        image_bytes: &[u8],
    ) -> Result<String, OpenAiApiError> {
        let body = caption_request(model, image_bytes);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let parsed: ChatResponse = Self::parse_response(response).await?;
        let caption = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(OpenAiApiError::MissingContent)?;

        tracing::debug!(model, caption_len = caption.len(), "Caption generated");
        Ok(caption)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success; classifies 401/403 as [`Auth`] and
    /// any other failure status as [`Api`], preserving the body text.
    ///
    /// [`Auth`]: OpenAiApiError::Auth
    /// [`Api`]: OpenAiApiError::Api
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, OpenAiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let status = status.as_u16();
            return Err(if status == 401 || status == 403 {
                OpenAiApiError::Auth { status, body }
            } else {
                OpenAiApiError::Api { status, body }
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OpenAiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
