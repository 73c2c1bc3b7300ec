//! Search and word-cloud command handlers.

use anyhow::Result;
use std::path::Path;

use super::open_repository;
use crate::cli::output::{OutputFormat, RevListing, SearchListing};
use crate::cli::{SearchArgs, WordCloudArgs};
use crate::infra::PREVIEW_FETCH_LEN;

pub fn handle_search(args: &SearchArgs, nest: Option<&Path>) -> Result<()> {
    let repo = open_repository(nest)?;

    let mut rows = Vec::new();
    for hit in repo.search(&args.query)? {
        let rev = hit.resolve(&repo)?;
        rows.push(SearchListing::from_hit(&hit, rev.note_id.as_i64()));
    }

    match args.format {
        OutputFormat::Human => {
            for row in &rows {
                println!("{}", row.human_line());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

pub fn handle_word_cloud(args: &WordCloudArgs, nest: Option<&Path>) -> Result<()> {
    let repo = open_repository(nest)?;

    // With a term, show the notes it appears in; without, the term table.
    if let Some(term) = &args.term {
        let mut rows = Vec::new();
        for rev in repo.term_instances(term)? {
            let head = repo.blob_head(&rev.sha256, PREVIEW_FETCH_LEN)?;
            rows.push(RevListing::from_rev(&rev, &head));
        }

        match args.format {
            OutputFormat::Human => {
                for row in &rows {
                    println!("{}", row.human_line());
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        }
        return Ok(());
    }

    let terms = repo.word_cloud_terms()?;
    match args.format {
        OutputFormat::Human => {
            for stat in &terms {
                println!(
                    "{:>20} - appears {:>5} times in {:>5} notes",
                    stat.term, stat.instance_count, stat.note_count
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&terms)?),
    }
    Ok(())
}
