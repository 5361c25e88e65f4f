//! Shell core
//!
//! This module contains:
//! - [`registry::OptionRegistry`] / [`registry::CommandRegistry`] - the
//!   shared registries extensions plug into
//! - [`context::ShellContext`] - per-session environment
//! - [`backend::ShellBackend`] - evaluation backend trait
//! - [`line::Shell`] - the interactive loop

pub mod backend;
pub mod completer;
pub mod context;
pub mod line;
pub mod registry;

pub use backend::{EvalResult, ScratchBackend, ShellBackend};
pub use context::{ClassDocs, Loader, ShellContext, Value};
pub use line::{Flow, Shell, ShellError};
pub use registry::{
    CommandOutcome, CommandRegistry, OptionRegistry, RegistryError, SetOutcome,
};
