//! Structured chat completion actions.
//!
//! # Example
//!
//! ```no_run
//! use cardsmith::ChatClient;
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, JsonSchema)]
//! struct Summary {
//!     title: String,
//!     points: Vec<String>,
//! }
//!
//! # async fn example() -> cardsmith::Result<()> {
//! let client = ChatClient::builder().api_key("sk-...").build()?;
//! let summary: Summary = client
//!     .chat()
//!     .structured_as("Summarize the text.", "Rust is a systems language...")
//!     .await?;
//! println!("{}: {:?}", summary.title, summary.points);
//! # Ok(())
//! # }
//! ```

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::ChatClient;
use crate::error::Result;
use crate::schema::strict_schema_for;

/// Provides access to chat completion operations.
///
/// Obtained via [`ChatClient::chat()`].
#[derive(Debug)]
pub struct ChatActions<'a> {
    pub(crate) client: &'a ChatClient,
}

impl ChatActions<'_> {
    /// Request a value conforming to `schema` and return it as JSON.
    ///
    /// The schema is sent as a strict `json_schema` response format, so the
    /// service enforces its shape. `schema_name` must match
    /// `^[a-zA-Z0-9_-]+$`.
    pub async fn structured(
        &self,
        system: &str,
        user: &str,
        schema_name: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let content = self
            .client
            .complete_structured(system, user, schema_name, schema)
            .await?;
        debug!(bytes = content.len(), "Received structured content");
        Ok(serde_json::from_str(&content)?)
    }

    /// Request a value of type `T`, using its derived JSON schema.
    pub async fn structured_as<T>(&self, system: &str, user: &str) -> Result<T>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let schema = strict_schema_for::<T>()?;
        let value = self
            .structured(system, user, &T::schema_name(), &schema)
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}
