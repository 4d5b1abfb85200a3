//! Domain models for the commit message policy.
//!
//! - `CommitMessage`: the parsed message under validation
//! - `Header`: conventional view of the first line
//! - `ConfigError` / `CommitlintError`: error taxonomy

pub mod error;
pub mod header;
pub mod message;

pub use error::{CommitlintError, ConfigError, Result};
pub use header::Header;
pub use message::{strip_comments, CommitMessage, BREAKING_CHANGE_TOKENS, SCISSORS_LINE};
