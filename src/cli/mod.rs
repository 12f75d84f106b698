//! CLI for the sourcewell-server binary.
//!
//! Uses clap for argument parsing and owo-colors for terminal output.

pub mod output;

use clap::{Parser, Subcommand};

/// Sourcewell - grounded document Q&A server
#[derive(Parser, Debug)]
#[command(
    name = "sourcewell-server",
    version,
    about = "Sourcewell - grounded document Q&A server",
    long_about = "Answers questions from an ingested PDF corpus with per-claim citations.\n\n\
                  Run without arguments to start the server. The corpus is prepared\n\
                  offline: 'ingest' chunks the PDFs, 'embed' builds the vector index.",
    after_help = "EXAMPLES:\n    \
                  sourcewell-server ingest      # Chunk data/pdfs into the raw index\n    \
                  sourcewell-server embed       # Embed the raw index (needs OPENAI_API_KEY)\n    \
                  sourcewell-server             # Start the server"
)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (the default when no subcommand is given)
    Serve,

    /// Extract and chunk the PDF corpus into the raw index artifact
    Ingest,

    /// Embed the raw index into the queryable index artifact
    Embed,
}
