//! The seam between deck generation and the text-generation service.
//!
//! A [`Backend`] takes a [`StructuredRequest`] and returns JSON that should
//! conform to the request's schema, or fails. [`ChatClient`] is the
//! production implementation; tests substitute their own.

use std::fmt;
use std::future::Future;

use cardsmith::ChatClient;

/// One structured generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    /// Instructions for the model (role, card count, deck name).
    pub system_instruction: String,
    /// The material to work on.
    pub user_instruction: String,
    /// Name of the target schema.
    pub schema_name: String,
    /// The target JSON schema.
    pub schema: serde_json::Value,
}

/// A text-generation service able to return schema-conformant JSON.
///
/// Implementations must be shareable by reference across documents; the
/// engine never needs mutable access.
pub trait Backend {
    /// Generate a value for `request`.
    fn generate_structured(
        &self,
        request: &StructuredRequest,
    ) -> impl Future<Output = Result<serde_json::Value, BackendError>> + Send;
}

impl Backend for ChatClient {
    async fn generate_structured(
        &self,
        request: &StructuredRequest,
    ) -> Result<serde_json::Value, BackendError> {
        let value = self
            .chat()
            .structured(
                &request.system_instruction,
                &request.user_instruction,
                &request.schema_name,
                &request.schema,
            )
            .await?;
        Ok(value)
    }
}

impl<B: Backend + Sync> Backend for &B {
    fn generate_structured(
        &self,
        request: &StructuredRequest,
    ) -> impl Future<Output = Result<serde_json::Value, BackendError>> + Send {
        (**self).generate_structured(request)
    }
}

/// Error reported by a [`Backend`].
#[derive(Debug)]
pub enum BackendError {
    /// The chat completions client failed.
    Client(cardsmith::Error),
    /// Any other backend failure.
    Other(String),
}

impl BackendError {
    /// Create an error from a message.
    pub fn other(message: impl Into<String>) -> Self {
        BackendError::Other(message.into())
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Client(e) => write!(f, "{}", e),
            BackendError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Client(e) => Some(e),
            BackendError::Other(_) => None,
        }
    }
}

impl From<cardsmith::Error> for BackendError {
    fn from(err: cardsmith::Error) -> Self {
        BackendError::Client(err)
    }
}
