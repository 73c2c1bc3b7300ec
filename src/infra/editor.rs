//! External editor integration.
//!
//! Note content is round-tripped through a scratch file: write the starting
//! content, hand the file to the user's editor, read the result back. The
//! scratch file is removed when the handle drops, whether or not the editor
//! succeeded.

use std::fs;
use std::io::{self, Write};
use std::process::Command;
use tempfile::Builder;
use thiserror::Error;

/// Errors when running the external editor.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor command is empty")]
    EmptyCommand,

    #[error("failed to launch editor '{editor}': {source}")]
    Launch {
        editor: String,
        #[source]
        source: io::Error,
    },

    #[error("editor '{editor}' exited with non-zero status")]
    NonZeroExit { editor: String },

    #[error("scratch file error: {0}")]
    Scratch(#[from] io::Error),
}

/// Opens `editor` on a scratch file seeded with `initial` and returns the
/// saved content.
///
/// `editor` may carry arguments ("code --wait"); the first token is the
/// program. Blocks until the editor process exits.
pub fn edit_in_scratch_file(editor: &str, initial: &[u8]) -> Result<Vec<u8>, EditorError> {
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        return Err(EditorError::EmptyCommand);
    };

    let mut scratch = Builder::new().suffix(".md").tempfile()?;
    scratch.write_all(initial)?;
    scratch.flush()?;

    let status = Command::new(cmd)
        .args(args)
        .arg(scratch.path())
        .status()
        .map_err(|e| EditorError::Launch {
            editor: editor.to_string(),
            source: e,
        })?;

    if !status.success() {
        return Err(EditorError::NonZeroExit {
            editor: editor.to_string(),
        });
    }

    Ok(fs::read(scratch.path())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_editor_command_is_rejected() {
        assert!(matches!(
            edit_in_scratch_file("", b"content"),
            Err(EditorError::EmptyCommand)
        ));
        assert!(matches!(
            edit_in_scratch_file("   ", b"content"),
            Err(EditorError::EmptyCommand)
        ));
    }

    #[test]
    fn unknown_editor_fails_to_launch() {
        let err = edit_in_scratch_file("definitely-not-an-editor-binary", b"x").unwrap_err();
        assert!(matches!(err, EditorError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn editor_output_is_read_back() {
        // "true" leaves the scratch file untouched, so we read back the seed.
        let content = edit_in_scratch_file("true", b"seeded content").unwrap();
        assert_eq!(content, b"seeded content");
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_is_an_error() {
        let err = edit_in_scratch_file("false", b"x").unwrap_err();
        assert!(matches!(err, EditorError::NonZeroExit { .. }));
    }
}
