//! Error types for cardsmith-engine.
//!
//! Errors fall into the kinds a deck run can hit:
//!
//! 1. **Caller errors**: invalid arguments such as a card count of zero
//! 2. **Missing input**: a source file or input directory that does not exist
//! 3. **Generation errors**: the backend failed or returned an unusable deck
//! 4. **Write errors**: the CSV artifact could not be written
//!
//! Generation and write errors are isolated per document by the pipeline;
//! only the first two ever reach the caller of a batch run.
//!
//! # Example
//!
//! ```no_run
//! use cardsmith_engine::{Engine, Error};
//!
//! # async fn example(engine: Engine<cardsmith::ChatClient>) {
//! match engine.batch().process_directory("essays", "decks", 5).await {
//!     Ok(decks) => println!("Generated {} decks", decks.len()),
//!     Err(Error::NotFound(path)) => eprintln!("No such directory: {}", path.display()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;

/// Result type for cardsmith-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning documents into decks.
#[derive(Debug)]
pub enum Error {
    /// A caller-supplied argument was invalid.
    Validation(String),

    /// A source file or input directory does not exist.
    NotFound(PathBuf),

    /// The generation backend failed or returned data that is not a deck.
    Generation(String),

    /// The deck could not be written to its CSV file.
    Write {
        /// The output path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// An I/O error occurred while reading input.
    Io(std::io::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "validation error: {}", msg),
            Error::NotFound(path) => write!(f, "not found: {}", path.display()),
            Error::Generation(msg) => write!(f, "generation failed: {}", msg),
            Error::Write { path, message } => {
                write!(f, "failed to write '{}': {}", path.display(), message)
            }
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
