//! Verbose print extension
//!
//! A one-shot or sticky flag telling the shell to print the next (or all)
//! evaluated values verbosely. `:set verbose` arms a one-shot,
//! `:set verbose=on|off` switches the sticky mode.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ext::parse_flag;
use crate::shell::context::ShellContext;
use crate::shell::registry::{OptionRegistry, RegistryError, SetOutcome};

/// Verbose-print mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerboseMode {
    /// Plain printing
    Off,
    /// Print the next value verbosely, then fall back to `Off`
    Once,
    /// Print every value verbosely
    Always,
}

/// Verbose print flag
#[derive(Debug)]
pub struct VerbosePrint {
    mode: VerboseMode,
}

impl Default for VerbosePrint {
    fn default() -> Self {
        Self::new()
    }
}

impl VerbosePrint {
    /// Create the extension, initially off
    pub fn new() -> Self {
        Self {
            mode: VerboseMode::Off,
        }
    }

    /// Current mode
    pub fn mode(&self) -> VerboseMode {
        self.mode
    }

    /// Arm a one-shot verbose print; sticky mode is left alone
    pub fn request_once(&mut self) {
        if self.mode == VerboseMode::Off {
            self.mode = VerboseMode::Once;
        }
    }

    /// Whether the value about to be printed should be verbose
    ///
    /// Consumes a one-shot request.
    pub fn take(&mut self) -> bool {
        match self.mode {
            VerboseMode::Off => false,
            VerboseMode::Always => true,
            VerboseMode::Once => {
                self.mode = VerboseMode::Off;
                true
            }
        }
    }

    /// Register the `verbose` option
    pub fn register(
        ext: &Rc<RefCell<Self>>,
        options: &mut OptionRegistry,
    ) -> Result<(), RegistryError> {
        let handle = Rc::clone(ext);
        options.register(
            "verbose",
            "verbose",
            Box::new(move |key, value, ctx| handle.borrow_mut().set_option(key, value, ctx)),
        )
    }

    fn set_option(
        &mut self,
        key: &str,
        value: Option<&str>,
        _ctx: &mut ShellContext,
    ) -> SetOutcome {
        if value.is_none() {
            self.request_once();
            return SetOutcome::Applied;
        }
        match parse_flag(value) {
            Some(true) => {
                self.mode = VerboseMode::Always;
                SetOutcome::Applied
            }
            Some(false) => {
                self.mode = VerboseMode::Off;
                SetOutcome::Applied
            }
            None => SetOutcome::Ignored(format!("usage: :set {}=<on|off>", key)),
        }
    }
}
