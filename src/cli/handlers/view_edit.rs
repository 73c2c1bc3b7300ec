//! View and Edit command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::{open_repository, resolve_target};
use crate::cli::{EditArgs, ViewArgs};
use crate::infra::{edit_in_scratch_file, markdown_to_terminal};

pub fn handle_view(args: &ViewArgs, nest: Option<&Path>) -> Result<()> {
    let repo = open_repository(nest)?;
    let rev = resolve_target(&repo, args.id, args.search.as_deref())?;
    let body = repo.blob_body(&rev.sha256)?;

    println!("{}", markdown_to_terminal(&String::from_utf8_lossy(&body)));
    Ok(())
}

pub fn handle_edit(args: &EditArgs, nest: Option<&Path>) -> Result<()> {
    let mut repo = open_repository(nest)?;
    let rev = resolve_target(&repo, args.id, args.search.as_deref())?;
    let body = repo.blob_body(&rev.sha256)?;

    let editor = repo.config_get("editor")?;
    let edited = edit_in_scratch_file(&editor, &body).context("running external editor")?;

    // Saving without changes is still a revision; the ledger records the act
    // of editing, not just content changes.
    let new_rev = repo.append_revision(rev.note_id, &edited)?;
    println!("{}", new_rev.sha256);
    Ok(())
}
