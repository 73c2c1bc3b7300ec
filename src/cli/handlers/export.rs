//! Export command handler.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::open_repository;
use crate::cli::ExportArgs;
use crate::export::export_markdown;

pub fn handle_export(args: &ExportArgs, nest: Option<&Path>) -> Result<()> {
    let repo = open_repository(nest)?;
    let doc = export_markdown(&repo)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &doc)
                .with_context(|| format!("writing export to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => print!("{doc}"),
    }
    Ok(())
}
