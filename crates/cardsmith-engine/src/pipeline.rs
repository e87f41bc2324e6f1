//! Single-document pipeline: read, generate, write.
//!
//! [`PipelineEngine::process_document`] is the fault-isolation boundary.
//! Whatever goes wrong is logged and reported as `None`. Use
//! [`PipelineEngine::try_process_document`] when the cause matters.
//!
//! # Example
//!
//! ```no_run
//! use cardsmith::ChatClient;
//! use cardsmith_engine::Engine;
//!
//! # async fn example() {
//! let client = ChatClient::builder().api_key("sk-...").build().unwrap();
//! let engine = Engine::new(client);
//!
//! let deck = engine
//!     .pipeline()
//!     .process_document(
//!         "assets/essays/romantic-essay.md",
//!         "assets/flashcards/romantic-flashcards.csv",
//!         Some("Romantic Period"),
//!         5,
//!     )
//!     .await;
//!
//! if deck.is_some() {
//!     println!("Successfully generated romantic flashcards!");
//! }
//! # }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, error};

use crate::backend::Backend;
use crate::generate::DeckGenerator;
use crate::naming::deck_name_from_path;
use crate::schema::Deck;
use crate::write::DeckWriter;
use crate::{Error, Result};

/// Single-document workflow engine.
#[derive(Debug)]
pub struct PipelineEngine<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> PipelineEngine<'a, B> {
    pub(crate) fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Turn one markdown file into a deck and its CSV file.
    ///
    /// When `deck_name` is `None` the name is derived from the source file
    /// name. Returns the deck only if both generation and writing succeeded;
    /// every failure is logged and yields `None`.
    pub async fn process_document(
        &self,
        source_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        deck_name: Option<&str>,
        num_cards: usize,
    ) -> Option<Deck> {
        let source_path = source_path.as_ref();
        match self
            .try_process_document(source_path, output_path, deck_name, num_cards)
            .await
        {
            Ok(deck) => Some(deck),
            Err(e) => {
                error!(
                    source = %source_path.display(),
                    error = %e,
                    "Error processing markdown to Anki"
                );
                None
            }
        }
    }

    /// Turn one markdown file into a deck and its CSV file, returning the
    /// failure cause.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `source_path` does not exist
    /// - [`Error::Io`] if it cannot be read as UTF-8 text
    /// - [`Error::Validation`] if `num_cards` is zero
    /// - [`Error::Generation`] if no deck was produced; nothing is written
    /// - [`Error::Write`] if the CSV could not be written
    pub async fn try_process_document(
        &self,
        source_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        deck_name: Option<&str>,
        num_cards: usize,
    ) -> Result<Deck> {
        let source_path = source_path.as_ref();
        let output_path = output_path.as_ref();

        let text = tokio::fs::read_to_string(source_path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::NotFound(source_path.to_path_buf()),
                _ => Error::Io(e),
            })?;

        let deck_name = match deck_name {
            Some(name) => name.to_string(),
            None => deck_name_from_path(source_path),
        };

        let deck = DeckGenerator::new(self.backend)
            .generate(&text, &deck_name, num_cards)
            .await?;

        DeckWriter::new().try_write(&deck, output_path)?;

        debug!(
            source = %source_path.display(),
            output = %output_path.display(),
            cards = deck.len(),
            "Wrote deck"
        );
        Ok(deck)
    }
}
