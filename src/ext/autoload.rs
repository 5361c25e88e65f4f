//! Autoload extension
//!
//! Exposes a one-way `autoload` option (alias `al`). Enabling installs the
//! shell's default class loader into the context. The flag never goes back
//! to false, and enabling is refused while an externally installed loader
//! is present.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ext::parse_flag;
use crate::shell::context::ShellContext;
use crate::shell::registry::{OptionRegistry, RegistryError, SetOutcome};

/// One-way autoload flag
#[derive(Debug, Default)]
pub struct Autoload {
    enabled: bool,
}

impl Autoload {
    /// Create the extension, initially disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether autoloading is enabled
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Register the `autoload` option and its `al` alias
    pub fn register(
        ext: &Rc<RefCell<Self>>,
        options: &mut OptionRegistry,
    ) -> Result<(), RegistryError> {
        let handle = Rc::clone(ext);
        options.register(
            "autoload",
            "autoload",
            Box::new(move |key, value, ctx| handle.borrow_mut().set_option(key, value, ctx)),
        )?;
        options.register_alias("al", "autoload")
    }

    fn set_option(
        &mut self,
        key: &str,
        value: Option<&str>,
        ctx: &mut ShellContext,
    ) -> SetOutcome {
        match parse_flag(value) {
            Some(true) => self.enable(ctx),
            Some(false) => {
                if self.enabled {
                    SetOutcome::Ignored("autoload is one-way and stays enabled".to_string())
                } else {
                    SetOutcome::Applied
                }
            }
            None => SetOutcome::Ignored(format!("usage: :set {}", key)),
        }
    }

    /// Enable autoloading, installing the default loader
    ///
    /// The external-loader check happens at call time; a loader installed
    /// after a failed attempt is still honored on the next attempt.
    pub fn enable(
        &mut self,
        ctx: &mut ShellContext,
    ) -> SetOutcome {
        if self.enabled {
            return SetOutcome::Ignored("autoload is already enabled".to_string());
        }
        if ctx.has_external_loader() {
            return SetOutcome::Ignored(
                "an external class loader is already installed; autoload not enabled".to_string(),
            );
        }
        self.enabled = true;
        ctx.install_default_loader();
        SetOutcome::Applied
    }
}
