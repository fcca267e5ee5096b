use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chatstat")]
#[command(version)]
#[command(about = "Analytics over anonymized chat message exports")]
pub struct Cli {
    /// Verbosity: -v for progress logging, -vv for debug output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run analytics queries over a message stream
    Run(RunArgs),

    /// List registered queries
    List,

    /// Print version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding inputs and receiving query results
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Prefix added to each identifier and output file
    #[arg(long)]
    pub prefix: Option<String>,

    /// Query indices or ids to run (all when omitted)
    #[arg(short, long, value_delimiter = ',')]
    pub queries: Vec<String>,

    /// Root user id for per-user queries, or "all".
    ///
    /// time_to_respond needs a concrete id; with "all" a run that reaches it
    /// stops there.
    #[arg(short, long)]
    pub user_id: Option<String>,

    /// Width of the word sequences counted by most_common_strings
    #[arg(short, long)]
    pub words_count: Option<usize>,

    /// Message stream path (default: {output_dir}/{prefix}_conversations.json)
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// User map path (default: {output_dir}/{prefix}_users.json)
    #[arg(long)]
    pub users: Option<PathBuf>,

    /// Conversation title map path (default: {output_dir}/{prefix}_conversation_titles.json)
    #[arg(long)]
    pub conversations: Option<PathBuf>,
}

/// Default log level for a `-v` count
pub fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}
