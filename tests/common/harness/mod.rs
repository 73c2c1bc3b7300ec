//! Test harness: an isolated nest file plus a command builder wired to it.

mod command;
mod env;

pub use command::NstCommand;
pub use env::TestEnv;
