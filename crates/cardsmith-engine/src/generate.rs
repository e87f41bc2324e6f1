//! Deck generation.
//!
//! The generator builds the instructions for one document and asks the
//! backend for a [`Deck`] matching the derived schema. The whole document
//! goes out in a single request. The reply is decoded as JSON data and
//! checked with [`Deck::validate`] before it is accepted.
//!
//! # Example
//!
//! ```no_run
//! use cardsmith::ChatClient;
//! use cardsmith_engine::Engine;
//!
//! # async fn example() -> cardsmith_engine::Result<()> {
//! let client = ChatClient::builder().api_key("sk-...").build().unwrap();
//! let engine = Engine::new(client);
//!
//! let text = std::fs::read_to_string("baroque-essay.md")?;
//! let deck = engine.generator().generate(&text, "Baroque Period", 5).await?;
//! for card in &deck.cards {
//!     println!("{} -> {}", card.question, card.answer);
//! }
//! # Ok(())
//! # }
//! ```

use tracing::{debug, warn};

use crate::backend::{Backend, StructuredRequest};
use crate::schema::Deck;
use crate::{Error, Result};

/// Cards requested per deck when the caller does not say otherwise.
pub const DEFAULT_NUM_CARDS: usize = 5;

/// Build the system instruction naming the card count and deck name.
pub fn system_instruction(deck_name: &str, num_cards: usize) -> String {
    format!(
        "You are an expert at creating Anki flashcards. Your task is to:\n\
         1. Read the provided text\n\
         2. Create {} Anki flashcards that cover the main concepts\n\
         3. Add relevant tags to each flashcard\n\
         4. Structure the output as an Anki deck with the name \"{}\".",
        num_cards, deck_name
    )
}

/// Build the user instruction carrying the source text verbatim.
pub fn user_instruction(text: &str) -> String {
    format!(
        "Please create Anki flashcards for the following text: {}",
        text
    )
}

/// Deck generation workflow.
#[derive(Debug)]
pub struct DeckGenerator<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> DeckGenerator<'a, B> {
    pub(crate) fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Build the request sent for one document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`] if the deck schema cannot be produced.
    pub fn request(
        &self,
        text: &str,
        deck_name: &str,
        num_cards: usize,
    ) -> Result<StructuredRequest> {
        let schema = Deck::schema()
            .map_err(|e| Error::Generation(format!("failed to build deck schema: {}", e)))?;
        Ok(StructuredRequest {
            system_instruction: system_instruction(deck_name, num_cards),
            user_instruction: user_instruction(text),
            schema_name: "Deck".to_string(),
            schema,
        })
    }

    /// Generate a deck of `num_cards` cards from `text`.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `num_cards` is zero; the backend is not called
    /// - [`Error::Generation`] if the backend fails or its output is not a
    ///   valid deck
    pub async fn generate(&self, text: &str, deck_name: &str, num_cards: usize) -> Result<Deck> {
        if num_cards < 1 {
            return Err(Error::Validation(
                "number of cards must be at least 1".to_string(),
            ));
        }

        let request = self.request(text, deck_name, num_cards)?;
        debug!(
            deck = %deck_name,
            cards = num_cards,
            chars = text.len(),
            "Requesting deck"
        );

        let value = self
            .backend
            .generate_structured(&request)
            .await
            .map_err(|e| {
                warn!(deck = %deck_name, error = %e, "Error generating flashcards");
                Error::Generation(e.to_string())
            })?;

        let mut deck: Deck = serde_json::from_value(value).map_err(|e| {
            warn!(deck = %deck_name, error = %e, "Backend output is not a deck");
            Error::Generation(format!("output does not match the deck schema: {}", e))
        })?;

        if let Err(e) = deck.validate() {
            warn!(deck = %deck_name, error = %e, "Rejected generated deck");
            return Err(e);
        }

        if deck.deck_name.trim().is_empty() {
            deck.deck_name = deck_name.to_string();
        }

        if deck.len() != num_cards {
            debug!(
                deck = %deck_name,
                requested = num_cards,
                received = deck.len(),
                "Card count differs from request"
            );
        }

        Ok(deck)
    }
}
