//! The chat completions client and builder.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::actions::ChatActions;
use crate::error::{Error, Result};
use crate::request::{ApiErrorBody, ChatRequest, ChatResponse, Message, ResponseFormat};

/// Default base URL (OpenAI).
const DEFAULT_URL: &str = "https://api.openai.com/v1";

/// Default model.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The main client for an OpenAI-compatible chat completions API.
///
/// The client is cheap to clone and holds no mutable state, so one instance
/// can be shared by every caller in a process.
///
/// # Example
///
/// ```no_run
/// use cardsmith::ChatClient;
///
/// # fn example() -> cardsmith::Result<()> {
/// let client = ChatClient::builder()
///     .api_key("sk-...")
///     .build()?;
/// assert_eq!(client.model(), "gpt-4o");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChatClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ChatClient {
    /// Create a builder for client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Access chat completion operations.
    pub fn chat(&self) -> ChatActions<'_> {
        ChatActions { client: self }
    }

    /// The model sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The API base URL, without the `/chat/completions` path.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a chat completion asking for output conforming to `schema` and
    /// return the raw message content.
    pub(crate) async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        schema_name: &str,
        schema: &serde_json::Value,
    ) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message::system(system), Message::user(user)],
            response_format: Some(ResponseFormat::json_schema(schema_name, schema)),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        self.send_request(&request).await
    }

    /// Send a request and extract the content of the first choice.
    async fn send_request(&self, request: &ChatRequest<'_>) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(url = %url, model = %request.model, "Sending chat completion");

        let mut builder = self.http_client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                Error::ConnectionRefused
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(Error::EmptyResponse)?;

        if let Some(refusal) = choice.message.refusal {
            return Err(Error::Refusal(refusal));
        }

        if let Some(reason @ ("length" | "content_filter")) = choice.finish_reason.as_deref() {
            return Err(Error::Truncated(reason.to_string()));
        }

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(Error::EmptyResponse),
        }
    }
}

/// Builder for creating a customized [`ChatClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use cardsmith::ChatClient;
///
/// # fn example() -> cardsmith::Result<()> {
/// let client = ChatClient::builder()
///     .url("https://api.openai.com/v1")
///     .api_key("my-secret-key")
///     .model("gpt-4o")
///     .max_tokens(2048)
///     .timeout(Duration::from_secs(90))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API base URL.
    ///
    /// Defaults to `https://api.openai.com/v1`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key, sent as a bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name.
    ///
    /// Defaults to `gpt-4o`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature. Unset means the service default.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the number of generated tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 60 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`Error::Config`] for an empty model name, a temperature
    /// outside `0.0..=2.0`, or when the HTTP client cannot be created.
    pub fn build(self) -> Result<ChatClient> {
        if self.model.trim().is_empty() {
            return Err(Error::Config("model name must not be empty".to_string()));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(Error::Config(format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    t
                )));
            }
        }

        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(ChatClient {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
