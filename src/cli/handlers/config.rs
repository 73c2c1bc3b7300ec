//! Config command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_repository;
use crate::cli::{GetConfigArgs, SetConfigArgs};

pub fn handle_get_config(args: &GetConfigArgs, nest: Option<&Path>) -> Result<()> {
    let repo = open_repository(nest)?;

    match &args.key {
        Some(key) => {
            let value = repo
                .config_get(key)
                .with_context(|| format!("getting config '{key}'"))?;
            println!("{value}");
        }
        None => {
            for key in repo.config_keys()? {
                let value = repo.config_get(&key)?;
                println!("{key}={value}");
            }
        }
    }
    Ok(())
}

pub fn handle_set_config(args: &SetConfigArgs, nest: Option<&Path>) -> Result<()> {
    let mut repo = open_repository(nest)?;
    repo.config_set(&args.key, &args.value)
        .with_context(|| format!("setting config '{}'", args.key))?;
    Ok(())
}
