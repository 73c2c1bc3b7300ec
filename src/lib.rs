//! nest - content-addressed notes with full revision history

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;
pub mod store;
pub mod web;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    handlers::{
        handle_browse, handle_completions, handle_edit, handle_export, handle_get_config,
        handle_history, handle_init, handle_new, handle_search, handle_serve_web,
        handle_set_config, handle_view, handle_word_cloud,
    },
    Cli, Command,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let nest = cli.nest.as_deref();

    match &cli.command {
        Command::Init(args) => handle_init(args, nest),
        Command::New(args) => handle_new(args, nest),
        Command::Edit(args) => handle_edit(args, nest),
        Command::View(args) => handle_view(args, nest),
        Command::Browse(args) => handle_browse(args, nest),
        Command::History(args) => handle_history(args, nest),
        Command::Search(args) => handle_search(args, nest),
        Command::GetConfig(args) => handle_get_config(args, nest),
        Command::SetConfig(args) => handle_set_config(args, nest),
        Command::Export(args) => handle_export(args, nest),
        Command::ServeWeb(args) => handle_serve_web(args, nest),
        Command::WordCloud(args) => handle_word_cloud(args, nest),
        Command::Completions(args) => handle_completions(args),
    }
}
