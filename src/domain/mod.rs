//! Core value types shared across the store and presentation layers.

mod blob_hash;
mod revision;

pub use blob_hash::{BlobHash, BlobHashError};
pub use revision::{NoteId, NoteRev};
