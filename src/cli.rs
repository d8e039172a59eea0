use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytrank",
    about = "Rank a YouTube channel's videos by likes and collect transcripts",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the channel's videos sorted by likes and write a JSON document
    Collect {
        /// Path to write the JSON result
        #[arg(short, long, default_value = "output.json")]
        output: PathBuf,

        /// Skip transcript fetching (faster, cheaper)
        #[arg(long)]
        no_transcript: bool,

        /// Sleep between upstream API calls, in milliseconds
        #[arg(long)]
        throttle_ms: Option<u64>,

        /// Preferred caption language
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Turn a result document into AI summarization prompts
    Prompts {
        /// Result document from a previous collect run
        input: PathBuf,

        /// Number of videos to include
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// Summary language tag
        #[arg(short, long)]
        language: Option<String>,

        /// Ask for count and language at run time instead of reading the flags
        #[arg(long)]
        interactive: bool,

        /// Emit a plain watch-URL list instead of prompt blocks
        #[arg(long)]
        urls: bool,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
