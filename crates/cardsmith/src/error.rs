//! Error types for the cardsmith crate.
//!
//! The most common errors you'll encounter are:
//!
//! - [`Error::ConnectionRefused`]: the API endpoint is unreachable
//! - [`Error::Unauthorized`]: the API key is missing or rejected
//! - [`Error::Api`]: the service answered with an error status
//! - [`Error::Refusal`]: the model declined to answer
//!
//! # Example
//!
//! ```no_run
//! use cardsmith::{ChatClient, Error};
//!
//! # async fn example(client: ChatClient, schema: serde_json::Value) {
//! match client.chat().structured("system", "user", "Deck", &schema).await {
//!     Ok(value) => println!("{}", value),
//!     Err(Error::Unauthorized) => eprintln!("Check OPENAI_API_KEY"),
//!     Err(Error::Refusal(reason)) => eprintln!("Model refused: {}", reason),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// The error type for chat completion requests.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest.
    ///
    /// For connection failures, see [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status.
    ///
    /// `message` is taken from the `error.message` field of the body when
    /// present, otherwise it is the raw body.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the service.
        message: String,
    },

    /// The service answered without any usable message content.
    #[error("API returned an empty response")]
    EmptyResponse,

    /// The model stopped before finishing the structured value.
    #[error("response was truncated before completion (finish_reason: {0})")]
    Truncated(String),

    /// The model refused to produce the requested output.
    #[error("model refused the request: {0}")]
    Refusal(String),

    /// JSON serialization/deserialization error.
    ///
    /// Also returned when the message content is not valid JSON or does not
    /// match the requested type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Could not connect to the API endpoint.
    #[error("Could not connect to the API endpoint. Check the base URL and your network.")]
    ConnectionRefused,

    /// The API key was missing or rejected (HTTP 401/403).
    #[error("Unauthorized. Check the API key.")]
    Unauthorized,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A specialized Result type for chat completion operations.
pub type Result<T> = std::result::Result<T, Error>;
