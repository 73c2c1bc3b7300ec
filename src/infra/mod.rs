//! Process and rendering glue around the store: external editor, markdown
//! output, preview helpers.

mod editor;
mod markdown;
mod preview;

pub use editor::{edit_in_scratch_file, EditorError};
pub use markdown::{markdown_to_html, markdown_to_terminal};
pub use preview::{first_line, PREVIEW_FETCH_LEN};
