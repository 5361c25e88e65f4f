//! YanShell (言壳)
//!
//! An extensible interactive shell. The shell itself is a thin
//! read-eval-print loop; everything a user can toggle or invoke comes from
//! extensions that register handlers into two shared registries:
//!
//! - [`shell::OptionRegistry`] - `:set name=value` options
//! - [`shell::CommandRegistry`] - line-prefix commands (`?`, `r <file>`, ...)
//!
//! # Example
//!
//! ```no_run
//! use yanshell::shell::Shell;
//! use yanshell::util::config::UserConfig;
//!
//! fn main() -> yanshell::Result<()> {
//!     let mut shell = Shell::new(UserConfig::default())?;
//!     shell.run()?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/yanshell")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod doc;
pub mod ext;
pub mod shell;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

/// Shell version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shell name
pub const NAME: &str = "YanShell (言壳)";
