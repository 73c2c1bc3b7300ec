//! Web viewer command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_repository;
use crate::cli::ServeWebArgs;
use crate::web;

pub fn handle_serve_web(args: &ServeWebArgs, nest: Option<&Path>) -> Result<()> {
    let repo = open_repository(nest)?;

    // The rest of the CLI is synchronous; the runtime exists only for the
    // lifetime of the server.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    runtime.block_on(web::run_server(repo, &args.addr))
}
