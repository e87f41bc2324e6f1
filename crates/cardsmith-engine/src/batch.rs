//! Batch conversion of a directory of markdown files.
//!
//! Every `*.md` file directly inside the input directory runs through the
//! document pipeline on its own. A failing document is logged and skipped;
//! it never stops the rest of the batch. Only a missing input directory or
//! an invalid card count fails the whole run.
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
//! let report = engine
//!     .batch()
//!     .process_directory_report("assets/essays", "assets/flashcards", 5)
//!     .await?;
//! println!("{} of {} documents converted", report.decks.len(), report.considered);
//! for failure in &report.failures {
//!     println!("{}: {}", failure.file, failure.error);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::backend::Backend;
use crate::naming::{deck_name_from_filename, is_markdown, output_filename_for};
use crate::pipeline::PipelineEngine;
use crate::schema::Deck;
use crate::{Error, Result};

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Successfully generated decks, in processing order.
    pub decks: Vec<Deck>,
    /// Number of markdown files found.
    pub considered: usize,
    /// Documents that produced no deck.
    pub failures: Vec<BatchFailure>,
    /// Directory the CSV files were written to.
    pub output_dir: PathBuf,
}

impl BatchReport {
    /// Number of documents that produced no deck.
    pub fn failed(&self) -> usize {
        self.considered - self.decks.len()
    }
}

/// A document that failed during a batch run.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Source file name.
    pub file: String,
    /// Error message.
    pub error: String,
}

/// Batch workflow engine.
#[derive(Debug)]
pub struct BatchEngine<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> BatchEngine<'a, B> {
    pub(crate) fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Convert every markdown file in `input_dir` and return the decks that
    /// were produced.
    ///
    /// For `name.md` the deck is written to `output_dir/name-flashcards.csv`
    /// and named after the file (`american-gothic_lit.md` becomes
    /// "American Gothic Lit").
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `input_dir` does not exist or is not a directory
    /// - [`Error::Io`] if `input_dir` cannot be listed
    ///
    /// Per-document failures are not errors; they are logged and left out
    /// of the returned list. A `num_cards` of zero fails every document
    /// without reaching the backend.
    pub async fn process_directory(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        num_cards: usize,
    ) -> Result<Vec<Deck>> {
        let report = self
            .process_directory_report(input_dir, output_dir, num_cards)
            .await?;
        Ok(report.decks)
    }

    /// Like [`process_directory`](Self::process_directory), returning the
    /// full [`BatchReport`].
    pub async fn process_directory_report(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        num_cards: usize,
    ) -> Result<BatchReport> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();

        if !input_dir.is_dir() {
            return Err(Error::NotFound(input_dir.to_path_buf()));
        }

        let candidates = markdown_files(input_dir)?;

        if let Err(e) = std::fs::create_dir_all(output_dir) {
            warn!(
                output_dir = %output_dir.display(),
                error = %e,
                "Could not create output directory"
            );
        }

        let mut report = BatchReport {
            considered: candidates.len(),
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        };
        let pipeline = PipelineEngine::new(self.backend);

        for file_name in candidates {
            let input_path = input_dir.join(&file_name);
            let output_filename = output_filename_for(&file_name);
            let output_path = output_dir.join(&output_filename);
            let deck_name = deck_name_from_filename(&file_name);

            match pipeline
                .try_process_document(&input_path, &output_path, Some(deck_name.as_str()), num_cards)
                .await
            {
                Ok(deck) => {
                    info!(
                        file = %file_name,
                        output = %output_filename,
                        cards = deck.len(),
                        "Successfully processed {} -> {}",
                        file_name,
                        output_filename
                    );
                    report.decks.push(deck);
                }
                Err(e) => {
                    error!(file = %file_name, error = %e, "Error processing {}", file_name);
                    report.failures.push(BatchFailure {
                        file: file_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            processed = report.decks.len(),
            failed = report.failed(),
            output_dir = %output_dir.display(),
            "Processing complete"
        );
        Ok(report)
    }
}

/// Markdown file names directly inside `dir`, sorted.
fn markdown_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(String::from) else {
            debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
            continue;
        };
        if is_markdown(&name) && entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
