//! Command handlers for the CLI.

mod config;
mod export;
mod init;
mod list;
mod new;
mod search;
mod serve;
mod view_edit;

pub use config::{handle_get_config, handle_set_config};
pub use export::handle_export;
pub use init::handle_init;
pub use list::{handle_browse, handle_history};
pub use new::handle_new;
pub use search::{handle_search, handle_word_cloud};
pub use serve::handle_serve_web;
pub use view_edit::{handle_edit, handle_view};

use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use std::path::Path;

use crate::cli::{Cli, CompletionsArgs};
use crate::domain::NoteRev;
use crate::store::Repository;

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the nest file, resolving its location from the global `--nest` flag
/// or the default lookup. Fails if no nest file exists yet.
pub(crate) fn open_repository(nest: Option<&Path>) -> Result<Repository> {
    if let Some(path) = nest
        && !path.exists()
    {
        bail!(
            "no nest file found at {}; run 'nst init' first",
            path.display()
        );
    }

    let Some(path) = Repository::resolve_path(nest) else {
        bail!("no nest file found; run 'nst init' first");
    };

    tracing::debug!(path = %path.display(), "opening nest");
    Repository::open(&path).with_context(|| format!("failed to open nest at {}", path.display()))
}

/// Resolves the note a command operates on: an explicit id, or the
/// top-ranked full-text match for a query.
pub(crate) fn resolve_target(
    repo: &Repository,
    id: Option<i64>,
    search: Option<&str>,
) -> Result<NoteRev> {
    if let Some(id) = id {
        let id = crate::domain::NoteId::new(id);
        return Ok(repo.current_revision(id)?);
    }

    if let Some(query) = search {
        let hits = repo.search(query)?;
        let Some(best) = hits.first() else {
            bail!("no notes match '{query}'");
        };
        return Ok(best.resolve(repo)?);
    }

    bail!("provide --id or --search to pick a note");
}

/// Handler for the `completions` command.
pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "nst", &mut std::io::stdout());
    Ok(())
}
