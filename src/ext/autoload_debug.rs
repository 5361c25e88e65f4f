//! Autoload debug extension
//!
//! A debug flag plus a recursion-depth counter for nested load operations.
//! The loading wrapper is responsible for pairing `enter`/`leave` calls;
//! the counter itself is unbounded.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::ext::parse_flag;
use crate::shell::context::ShellContext;
use crate::shell::registry::{OptionRegistry, RegistryError, SetOutcome};

/// Debug flag and load-depth counter
#[derive(Debug, Default)]
pub struct AutoloadDebug {
    enabled: bool,
    depth: usize,
}

impl AutoloadDebug {
    /// Create the extension, initially disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether debug tracing is enabled
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Register the `autoloaddebug` option
    pub fn register(
        ext: &Rc<RefCell<Self>>,
        options: &mut OptionRegistry,
    ) -> Result<(), RegistryError> {
        let handle = Rc::clone(ext);
        options.register(
            "autoloaddebug",
            "autoload-debug",
            Box::new(move |key, value, ctx| handle.borrow_mut().set_option(key, value, ctx)),
        )
    }

    fn set_option(
        &mut self,
        key: &str,
        value: Option<&str>,
        _ctx: &mut ShellContext,
    ) -> SetOutcome {
        match parse_flag(value) {
            Some(flag) => {
                self.enabled = flag;
                SetOutcome::Applied
            }
            None => SetOutcome::Ignored(format!("usage: :set {}=<on|off>", key)),
        }
    }

    /// Record entry into a load operation
    pub fn enter(
        &mut self,
        class: &str,
    ) {
        if self.enabled {
            debug!("{}-> loading {}", "  ".repeat(self.depth), class);
        }
        self.depth += 1;
    }

    /// Record completion of a load operation
    pub fn leave(
        &mut self,
        class: &str,
    ) {
        self.depth = self.depth.saturating_sub(1);
        if self.enabled {
            debug!("{}<- loaded {}", "  ".repeat(self.depth), class);
        }
    }
}
