//! Init command handler.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::InitArgs;
use crate::store::Repository;

pub fn handle_init(args: &InitArgs, nest: Option<&Path>) -> Result<()> {
    let path = args
        .path
        .clone()
        .or_else(|| nest.map(Path::to_path_buf))
        .unwrap_or_else(Repository::default_path);

    let repo = Repository::open(&path)
        .with_context(|| format!("failed to initialize nest at {}", path.display()))?;

    println!(
        "Initialized nest at {} (schema version {})",
        path.display(),
        repo.schema_version()?
    );
    Ok(())
}
