//! An async Rust client for OpenAI-compatible chat completion APIs with
//! structured (JSON schema) output.
//!
//! The client asks the model for a value that conforms to a declared schema
//! and hands back parsed JSON. Model text is only ever decoded as data.
//!
//! # Quick Start
//!
//! ```no_run
//! use cardsmith::ChatClient;
//!
//! # async fn example() -> cardsmith::Result<()> {
//! let client = ChatClient::builder()
//!     .api_key("sk-...")
//!     .build()?;
//!
//! let schema = serde_json::json!({
//!     "type": "object",
//!     "properties": { "answer": { "type": "string" } },
//!     "required": ["answer"],
//!     "additionalProperties": false
//! });
//!
//! let value = client
//!     .chat()
//!     .structured("Answer briefly.", "What is 2 + 2?", "Answer", &schema)
//!     .await?;
//! println!("{}", value["answer"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Client Configuration
//!
//! ```no_run
//! use std::time::Duration;
//! use cardsmith::ChatClient;
//!
//! # fn example() -> cardsmith::Result<()> {
//! let client = ChatClient::builder()
//!     .url("http://localhost:11434/v1")
//!     .api_key("your-api-key")
//!     .model("gpt-4o-mini")
//!     .temperature(0.2)
//!     .timeout(Duration::from_secs(120))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Action Groups
//!
//! - [`ChatClient::chat()`] - Structured chat completions

pub mod actions;
pub mod client;
pub mod error;
mod request;
pub mod schema;

pub use client::{ChatClient, ClientBuilder};
pub use error::{Error, Result};
pub use schema::{make_strict, strict_schema_for};
