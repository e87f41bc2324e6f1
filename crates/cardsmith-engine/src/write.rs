//! CSV serialization of decks.
//!
//! The artifact is UTF-8 with the header `Question,Answer,Tags` and one row
//! per card in deck order. Tags are joined with `", "`. Fields are quoted
//! only when they contain the delimiter, a quote or a line break, and quotes
//! inside quoted fields are doubled. Rows end in `\r\n`.

use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::{debug, error};

use crate::schema::Deck;
use crate::{Error, Result};

/// Header row of every deck CSV.
pub const CSV_HEADER: [&str; 3] = ["Question", "Answer", "Tags"];

/// Writes decks to CSV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckWriter;

impl DeckWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `deck` to `output_path`, reporting success as a boolean.
    ///
    /// Failures are logged and returned as `false`; this never panics or
    /// returns an error.
    pub fn write(&self, deck: &Deck, output_path: impl AsRef<Path>) -> bool {
        match self.try_write(deck, output_path) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Error writing deck to CSV");
                false
            }
        }
    }

    /// Write `deck` to `output_path`.
    ///
    /// Creates missing parent directories and overwrites any existing file.
    pub fn try_write(&self, deck: &Deck, output_path: impl AsRef<Path>) -> Result<()> {
        let path = output_path.as_ref();
        let write_error = |message: String| Error::Write {
            path: path.to_path_buf(),
            message,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                write_error(format!(
                    "failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let bytes = self.to_csv_bytes(deck).map_err(write_error)?;
        std::fs::write(path, bytes).map_err(|e| write_error(e.to_string()))?;

        debug!(
            path = %path.display(),
            deck = %deck.deck_name,
            cards = deck.len(),
            "Wrote deck"
        );
        Ok(())
    }

    /// Render `deck` as CSV text, byte-for-byte what [`try_write`](Self::try_write)
    /// puts on disk.
    pub fn to_csv_string(&self, deck: &Deck) -> Result<String> {
        let bytes = self.to_csv_bytes(deck).map_err(std::io::Error::other)?;
        String::from_utf8(bytes)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    fn to_csv_bytes(&self, deck: &Deck) -> std::result::Result<Vec<u8>, String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER).map_err(|e| e.to_string())?;
        for card in &deck.cards {
            writer
                .write_record([
                    card.question.as_str(),
                    card.answer.as_str(),
                    card.joined_tags().as_str(),
                ])
                .map_err(|e| e.to_string())?;
        }

        writer.into_inner().map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Flashcard;

    #[test]
    fn test_header_only_for_empty_deck() {
        let csv = DeckWriter::new()
            .to_csv_string(&Deck::new("Empty", Vec::new()))
            .unwrap();
        assert_eq!(csv, "Question,Answer,Tags\r\n");
    }

    #[test]
    fn test_plain_fields_are_not_quoted() {
        let deck = Deck::new("X", vec![Flashcard::new("Q1", "A1", ["solo"])]);
        let csv = DeckWriter::new().to_csv_string(&deck).unwrap();
        assert_eq!(csv, "Question,Answer,Tags\r\nQ1,A1,solo\r\n");
    }

    #[test]
    fn test_quoting() {
        let deck = Deck::new(
            "X",
            vec![Flashcard::new(
                "What did he say?",
                "He said, \"hello\"",
                ["a", "b"],
            )],
        );
        let csv = DeckWriter::new().to_csv_string(&deck).unwrap();
        assert_eq!(
            csv,
            "Question,Answer,Tags\r\nWhat did he say?,\"He said, \"\"hello\"\"\",\"a, b\"\r\n"
        );
    }

    #[test]
    fn test_newlines_are_quoted() {
        let deck = Deck::new("X", vec![Flashcard::new("Q", "line one\nline two", ["t"])]);
        let csv = DeckWriter::new().to_csv_string(&deck).unwrap();
        assert!(csv.contains("\"line one\nline two\""));
    }
}
