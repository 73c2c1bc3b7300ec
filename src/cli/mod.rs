//! CLI command definitions and handlers

pub mod handlers;
pub mod output;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// nst - content-addressed notes with full revision history
#[derive(Parser, Debug)]
#[command(name = "nst", version, about, long_about = None)]
pub struct Cli {
    /// Path to the nest file (overrides the default lookup)
    #[arg(long, global = true)]
    pub nest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new nest file
    Init(InitArgs),

    /// Create a new note
    New(NewArgs),

    /// Edit a note's current revision in your editor
    Edit(EditArgs),

    /// Show a note's current revision rendered for the terminal
    View(ViewArgs),

    /// List notes, most recently modified first
    #[command(alias = "ls")]
    Browse(BrowseArgs),

    /// Show a note's full revision history
    History(HistoryArgs),

    /// Full-text search across current revisions
    Search(SearchArgs),

    /// Get a config value, or list all of them
    GetConfig(GetConfigArgs),

    /// Set a config value
    SetConfig(SetConfigArgs),

    /// Export all notes as one markdown document
    Export(ExportArgs),

    /// Serve a read-only web viewer
    ServeWeb(ServeWebArgs),

    /// Show term frequencies, or the notes containing one term
    WordCloud(WordCloudArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to create the nest file (default: ~/.notebook.nest)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note content; skips the external editor
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note id to edit
    #[arg(long, conflicts_with = "search")]
    pub id: Option<i64>,

    /// Edit the top-ranked note matching this query
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for the `view` command
#[derive(Parser, Debug)]
pub struct ViewArgs {
    /// Note id to view
    #[arg(long, conflicts_with = "search")]
    pub id: Option<i64>,

    /// View the top-ranked note matching this query
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for the `browse` (ls) command
#[derive(Parser, Debug)]
pub struct BrowseArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `history` command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Note id
    #[arg(long)]
    pub id: i64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query (FTS5 syntax)
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `get-config` command
#[derive(Parser, Debug)]
pub struct GetConfigArgs {
    /// Config key to read; omit to list all keys and values
    #[arg(long)]
    pub key: Option<String>,
}

/// Arguments for the `set-config` command
#[derive(Parser, Debug)]
pub struct SetConfigArgs {
    /// Config key to change
    #[arg(long)]
    pub key: String,

    /// New value
    #[arg(long)]
    pub value: String,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `serve-web` command
#[derive(Parser, Debug)]
pub struct ServeWebArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub addr: String,
}

/// Arguments for the `word-cloud` command
#[derive(Parser, Debug)]
pub struct WordCloudArgs {
    /// Show the notes containing this term instead of the term table
    #[arg(long)]
    pub term: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
