//! Shell extensions
//!
//! Each extension is a self-contained plugin that registers option and/or
//! command handlers into the shared registries:
//!
//! - [`autoload::Autoload`] - one-way dynamic class loading flag
//! - [`autoload_debug::AutoloadDebug`] - load tracing with a depth counter
//! - [`colour::Colour`] - named colour schemes
//! - [`exec_time::ExecTime`] - per-evaluation timing
//! - [`inline_help::InlineHelp`] - `?` documentation queries
//! - [`load_script::LoadScript`] - `r <filename>` script replay
//! - [`verbose_print::VerbosePrint`] - verbose value printing
//!
//! Extensions live behind `Rc<RefCell<_>>` so registry closures and the
//! shell share one instance; the shell is single-threaded.

pub mod autoload;
pub mod autoload_debug;
pub mod colour;
pub mod exec_time;
pub mod inline_help;
pub mod load_script;
pub mod verbose_print;

pub use autoload::Autoload;
pub use autoload_debug::AutoloadDebug;
pub use colour::{Colour, Scheme};
pub use exec_time::ExecTime;
pub use inline_help::InlineHelp;
pub use load_script::LoadScript;
pub use verbose_print::{VerboseMode, VerbosePrint};

use std::cell::RefCell;
use std::rc::Rc;

use crate::shell::registry::{CommandRegistry, OptionRegistry, RegistryError};

/// Parse a boolean option value
///
/// A missing value counts as enable (`:set name`). Unrecognized values map
/// to `None`; the caller leaves its state unchanged and reports usage.
pub(crate) fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value {
        None => Some(true),
        Some("enable") | Some("1") | Some("on") => Some(true),
        Some("disable") | Some("0") | Some("off") => Some(false),
        Some(_) => None,
    }
}

/// Handles to the default extension set
pub struct Extensions {
    /// Autoload flag
    pub autoload: Rc<RefCell<Autoload>>,
    /// Autoload debug tracing
    pub autoload_debug: Rc<RefCell<AutoloadDebug>>,
    /// Colour schemes
    pub colour: Rc<RefCell<Colour>>,
    /// Evaluation timing
    pub exec_time: Rc<RefCell<ExecTime>>,
    /// Script loader
    pub load_script: Rc<RefCell<LoadScript>>,
    /// Verbose printing
    pub verbose: Rc<RefCell<VerbosePrint>>,
}

/// Create the default extensions and register them into the registries
pub fn install_defaults(
    options: &mut OptionRegistry,
    commands: &mut CommandRegistry,
) -> Result<Extensions, RegistryError> {
    let autoload = Rc::new(RefCell::new(Autoload::new()));
    let autoload_debug = Rc::new(RefCell::new(AutoloadDebug::new()));
    let colour = Rc::new(RefCell::new(Colour::new()));
    let exec_time = Rc::new(RefCell::new(ExecTime::new()));
    let load_script = Rc::new(RefCell::new(LoadScript::new()));
    let verbose = Rc::new(RefCell::new(VerbosePrint::new()));

    Autoload::register(&autoload, options)?;
    AutoloadDebug::register(&autoload_debug, options)?;
    Colour::register(&colour, options)?;
    ExecTime::register(&exec_time, options)?;
    VerbosePrint::register(&verbose, options)?;

    InlineHelp::register(commands)?;
    LoadScript::register(&load_script, commands)?;

    Ok(Extensions {
        autoload,
        autoload_debug,
        colour,
        exec_time,
        load_script,
        verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::context::ShellContext;
    use crate::shell::registry::SetOutcome;

    #[test]
    fn test_parse_flag_values() {
        assert_eq!(parse_flag(None), Some(true));
        for v in ["enable", "1", "on"] {
            assert_eq!(parse_flag(Some(v)), Some(true), "value {:?}", v);
        }
        for v in ["disable", "0", "off"] {
            assert_eq!(parse_flag(Some(v)), Some(false), "value {:?}", v);
        }
        assert_eq!(parse_flag(Some("maybe")), None);
        assert_eq!(parse_flag(Some("ON")), None);
    }

    #[test]
    fn test_install_defaults_registers_everything() {
        let mut options = OptionRegistry::new();
        let mut commands = CommandRegistry::new();
        let exts = install_defaults(&mut options, &mut commands).unwrap();

        let names: Vec<&str> = options.names().collect();
        assert_eq!(
            names,
            vec!["autoload", "autoloaddebug", "background", "exectime", "verbose"]
        );
        assert_eq!(options.resolve("al"), Some("autoload"));
        assert_eq!(options.resolve("bg"), Some("background"));

        let mut ctx = ShellContext::new();
        assert_eq!(
            options.set("exectime", Some("on"), &mut ctx),
            SetOutcome::Applied
        );
        assert!(exts.exec_time.borrow().enabled());
    }
}
