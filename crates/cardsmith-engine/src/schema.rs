//! Flashcard and deck data contracts.
//!
//! These types are what the generation backend must produce. Their JSON
//! schema is derived with `schemars` and sent with every request, and
//! [`Deck::validate`] re-checks the parts a schema cannot express.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single question/answer card with topical tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Flashcard {
    /// The front side of the flashcard containing the question
    pub question: String,
    /// The back side of the flashcard containing the answer
    pub answer: String,
    /// List of tags associated with the flashcard
    pub tags: Vec<String>,
}

impl Flashcard {
    /// Create a card.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Tags joined into a single CSV field.
    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }
}

/// A named, ordered collection of flashcards generated from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Deck {
    /// List of flashcards in the deck
    pub cards: Vec<Flashcard>,
    /// Name of the Anki deck
    pub deck_name: String,
}

impl Deck {
    /// Create a deck.
    pub fn new(deck_name: impl Into<String>, cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            deck_name: deck_name.into(),
        }
    }

    /// The strict JSON schema requested from the backend.
    pub fn schema() -> cardsmith::Result<serde_json::Value> {
        cardsmith::strict_schema_for::<Deck>()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has no cards.
    ///
    /// An empty deck is valid; its CSV holds only the header row.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check that every card has a non-blank question and answer.
    pub fn validate(&self) -> Result<()> {
        for (i, card) in self.cards.iter().enumerate() {
            if card.question.trim().is_empty() {
                return Err(Error::Generation(format!(
                    "card {} has an empty question",
                    i + 1
                )));
            }
            if card.answer.trim().is_empty() {
                return Err(Error::Generation(format!(
                    "card {} has an empty answer",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
