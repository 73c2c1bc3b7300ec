//! Browse and history command handlers.

use anyhow::Result;
use std::path::Path;

use super::open_repository;
use crate::cli::output::{OutputFormat, RevListing};
use crate::cli::{BrowseArgs, HistoryArgs};
use crate::domain::{NoteId, NoteRev};
use crate::infra::PREVIEW_FETCH_LEN;
use crate::store::Repository;

fn listings(repo: &Repository, revs: &[NoteRev]) -> Result<Vec<RevListing>> {
    let mut rows = Vec::with_capacity(revs.len());
    for rev in revs {
        let head = repo.blob_head(&rev.sha256, PREVIEW_FETCH_LEN)?;
        rows.push(RevListing::from_rev(rev, &head));
    }
    Ok(rows)
}

fn print_listings(rows: &[RevListing], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for row in rows {
                println!("{}", row.human_line());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
    }
    Ok(())
}

pub fn handle_browse(args: &BrowseArgs, nest: Option<&Path>) -> Result<()> {
    let repo = open_repository(nest)?;
    let revs = repo.list_current_revisions()?;
    print_listings(&listings(&repo, &revs)?, args.format)
}

pub fn handle_history(args: &HistoryArgs, nest: Option<&Path>) -> Result<()> {
    let repo = open_repository(nest)?;
    let revs = repo.revision_history(NoteId::new(args.id))?;
    print_listings(&listings(&repo, &revs)?, args.format)
}
