//! Command-line entry point for generating flashcard decks from markdown.
//!
//! Credentials come from `OPENAI_API_KEY` (a `.env` file in the working
//! directory is loaded first) or `--api-key`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use cardsmith::ChatClient;
use cardsmith_engine::{DEFAULT_NUM_CARDS, Deck, Engine};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// CLI Arguments
// ============================================================================

/// Generate Anki flashcard CSVs from markdown essays.
#[derive(Parser, Debug)]
#[command(name = "cardsmith")]
#[command(version, about, long_about = None)]
struct Args {
    /// API key for the chat completions service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    base_url: String,

    /// Model used to generate the cards
    #[arg(long, env = "CARDSMITH_MODEL", default_value = "gpt-4o")]
    model: String,

    /// Sampling temperature (0.0 - 2.0); the service default when unset
    #[arg(long)]
    temperature: Option<f32>,

    /// Upper bound on tokens generated per response
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a single markdown file into a CSV deck
    File {
        /// Markdown file to read
        source: PathBuf,

        /// CSV file to write
        output: PathBuf,

        /// Deck name (derived from the file name when omitted)
        #[arg(long)]
        deck_name: Option<String>,

        /// Number of cards to generate
        #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_CARDS)]
        cards: usize,

        /// Print the generated cards to stdout
        #[arg(long, default_value_t = false)]
        print: bool,
    },

    /// Convert every markdown file in a directory
    Dir {
        /// Directory containing `*.md` files
        input_dir: PathBuf,

        /// Directory for the `*-flashcards.csv` files
        output_dir: PathBuf,

        /// Number of cards to generate per deck
        #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_CARDS)]
        cards: usize,
    },
}

// ============================================================================
// Commands
// ============================================================================

async fn run_file(
    engine: &Engine<ChatClient>,
    source: PathBuf,
    output: PathBuf,
    deck_name: Option<String>,
    cards: usize,
    print: bool,
) -> ExitCode {
    match engine
        .pipeline()
        .try_process_document(&source, &output, deck_name.as_deref(), cards)
        .await
    {
        Ok(deck) => {
            info!(
                deck = %deck.deck_name,
                cards = deck.len(),
                output = %output.display(),
                "Successfully generated flashcards"
            );
            if print {
                print_deck(&deck);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(source = %source.display(), error = %e, "No deck produced");
            ExitCode::FAILURE
        }
    }
}

async fn run_dir(
    engine: &Engine<ChatClient>,
    input_dir: PathBuf,
    output_dir: PathBuf,
    cards: usize,
) -> ExitCode {
    match engine
        .batch()
        .process_directory_report(&input_dir, &output_dir, cards)
        .await
    {
        Ok(report) => {
            println!("Processing complete!");
            println!("Processed {} files", report.decks.len());
            if !report.failures.is_empty() {
                println!("Failed {} files:", report.failures.len());
                for failure in &report.failures {
                    println!("  {}: {}", failure.file, failure.error);
                }
            }
            println!("Output files can be found in: {}", report.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(input_dir = %input_dir.display(), error = %e, "Batch run failed");
            ExitCode::FAILURE
        }
    }
}

fn print_deck(deck: &Deck) {
    for card in &deck.cards {
        println!("Question: {}", card.question);
        println!("Answer: {}", card.answer);
        println!("Tags: {}", card.joined_tags());
        println!("{}", "-".repeat(20));
    }
}

fn build_client(args: &Args) -> cardsmith::Result<ChatClient> {
    let mut builder = ChatClient::builder()
        .url(&args.base_url)
        .api_key(&args.api_key)
        .model(&args.model)
        .timeout(Duration::from_secs(args.timeout));
    if let Some(temperature) = args.temperature {
        builder = builder.temperature(temperature);
    }
    if let Some(max_tokens) = args.max_tokens {
        builder = builder.max_tokens(max_tokens);
    }
    builder.build()
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing
    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = match build_client(&args) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Invalid client configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(
        base_url = %client.base_url(),
        model = %client.model(),
        "Starting cardsmith"
    );
    let engine = Engine::new(client);

    match args.command {
        Command::File {
            source,
            output,
            deck_name,
            cards,
            print,
        } => run_file(&engine, source, output, deck_name, cards, print).await,
        Command::Dir {
            input_dir,
            output_dir,
            cards,
        } => run_dir(&engine, input_dir, output_dir, cards).await,
    }
}
