//! New note command handler.

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::open_repository;
use crate::cli::NewArgs;
use crate::infra::edit_in_scratch_file;

pub fn handle_new(args: &NewArgs, nest: Option<&Path>) -> Result<()> {
    let mut repo = open_repository(nest)?;

    let content = match &args.message {
        Some(message) => message.clone().into_bytes(),
        None => {
            let editor = repo.config_get("editor")?;
            edit_in_scratch_file(&editor, &[]).context("running external editor")?
        }
    };

    if content.iter().all(u8::is_ascii_whitespace) {
        bail!("empty note, nothing saved");
    }

    let rev = repo.create_note(&content)?;
    println!("{}", rev.sha256);
    Ok(())
}
