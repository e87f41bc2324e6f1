//! Turn markdown study material into flashcard decks and Anki-ready CSV.
//!
//! This crate drives a text-generation [`Backend`] (by default the
//! [`cardsmith`] chat client) to produce schema-validated [`Deck`]s and
//! writes each one to a CSV file with the columns `Question,Answer,Tags`.
//!
//! # Quick Start
//!
//! ```no_run
//! use cardsmith::ChatClient;
//! use cardsmith_engine::Engine;
//!
//! # async fn example() -> cardsmith_engine::Result<()> {
//! let client = ChatClient::builder()
//!     .api_key(std::env::var("OPENAI_API_KEY").unwrap_or_default())
//!     .build()
//!     .unwrap();
//! let engine = Engine::new(client);
//!
//! // One document
//! let deck = engine
//!     .pipeline()
//!     .process_document("essays/baroque.md", "decks/baroque.csv", Some("Baroque Period"), 5)
//!     .await;
//!
//! // A whole directory
//! let decks = engine.batch().process_directory("essays", "decks", 5).await?;
//! println!("Generated {} decks", decks.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `pipeline` - Single-document read/generate/write workflow
//! - `batch` - Directory conversion with per-document fault isolation
//!
//! Both are enabled by default.

mod error;

pub mod backend;
pub mod generate;
pub mod naming;
pub mod schema;
pub mod write;

#[cfg(feature = "pipeline")]
pub mod pipeline;

#[cfg(feature = "batch")]
pub mod batch;

pub use backend::{Backend, BackendError, StructuredRequest};
pub use error::{Error, Result};
pub use generate::{DEFAULT_NUM_CARDS, DeckGenerator};
pub use schema::{Deck, Flashcard};
pub use write::DeckWriter;

// Re-export the client for convenience
pub use cardsmith::{ChatClient, ClientBuilder};

#[cfg(feature = "batch")]
use batch::BatchEngine;

#[cfg(feature = "pipeline")]
use pipeline::PipelineEngine;

/// Workflow engine for deck generation.
///
/// The engine owns the generation backend and lends it to each workflow.
/// Nothing else is shared between documents.
///
/// # Example
///
/// ```no_run
/// use cardsmith_engine::{ChatClient, Engine};
///
/// # async fn example() -> cardsmith_engine::Result<()> {
/// let client = ChatClient::builder()
///     .api_key("sk-...")
///     .model("gpt-4o")
///     .build()
///     .unwrap();
/// let engine = Engine::new(client);
///
/// let deck = engine
///     .generator()
///     .generate("The Baroque period spans 1600-1750...", "Baroque Period", 3)
///     .await?;
/// engine.writer().write(&deck, "decks/baroque-flashcards.csv");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Engine<B> {
    backend: B,
}

impl<B: Backend> Engine<B> {
    /// Create an engine around a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Access deck generation.
    pub fn generator(&self) -> DeckGenerator<'_, B> {
        DeckGenerator::new(&self.backend)
    }

    /// Access the CSV writer.
    pub fn writer(&self) -> DeckWriter {
        DeckWriter::new()
    }

    /// Access the single-document pipeline.
    ///
    /// Reads a file, generates its deck and writes the CSV.
    #[cfg(feature = "pipeline")]
    pub fn pipeline(&self) -> PipelineEngine<'_, B> {
        PipelineEngine::new(&self.backend)
    }

    /// Access batch directory conversion.
    #[cfg(feature = "batch")]
    pub fn batch(&self) -> BatchEngine<'_, B> {
        BatchEngine::new(&self.backend)
    }
}
