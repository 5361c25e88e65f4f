//! Load script extension
//!
//! Reads a script file and returns its lines for replay through the shell,
//! discarding interpreter marker lines (shebang, open tag). Registered as
//! the `r <filename>` command.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::shell::registry::{CommandOutcome, CommandRegistry, RegistryError};

/// Script loader
#[derive(Debug)]
pub struct LoadScript {
    markers: Vec<String>,
}

impl Default for LoadScript {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadScript {
    /// Create the extension with the default marker prefixes
    pub fn new() -> Self {
        Self {
            markers: vec!["<?php".to_string(), "#!".to_string()],
        }
    }

    /// Read a script file into replayable lines
    ///
    /// Returns an empty sequence when the file cannot be read. Every line
    /// whose prefix is a marker is discarded, wherever it appears in the
    /// file; the remaining lines are returned verbatim, in file order.
    pub fn load_script(
        &self,
        path: &Path,
    ) -> Vec<String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        content
            .lines()
            .filter(|line| !self.is_marker(line))
            .map(str::to_string)
            .collect()
    }

    fn is_marker(
        &self,
        line: &str,
    ) -> bool {
        self.markers.iter().any(|m| line.starts_with(m.as_str()))
    }

    /// Register the `r <filename>` command
    pub fn register(
        ext: &Rc<RefCell<Self>>,
        commands: &mut CommandRegistry,
    ) -> Result<(), RegistryError> {
        let handle = Rc::clone(ext);
        commands.register(
            r"^r\s+\S+",
            "loadscript",
            "r <filename>",
            "load a script file and replay it line by line",
            Box::new(move |line, _ctx| {
                let path = line.splitn(2, char::is_whitespace).nth(1).unwrap_or("").trim();
                let lines = handle.borrow().load_script(Path::new(path));
                debug!("replaying {} line(s) from {}", lines.len(), path);
                CommandOutcome::Lines(lines)
            }),
        )
    }
}
