//! Execution time extension
//!
//! Records three timestamps per evaluation cycle (parse start, execution
//! start, end) and derives durations from them. Enabled via
//! `:set exectime=on|off`; when on, the shell prints a timing summary after
//! each evaluation.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::ext::parse_flag;
use crate::shell::context::ShellContext;
use crate::shell::registry::{OptionRegistry, RegistryError, SetOutcome};

/// Per-evaluation timing record
///
/// Timestamps are seconds since the extension was created. Once all three
/// are set, `end >= exec >= parse` holds and both durations are
/// non-negative.
#[derive(Debug)]
pub struct ExecTime {
    enabled: bool,
    origin: Instant,
    parse_start: Option<f64>,
    exec_start: Option<f64>,
    end: Option<f64>,
}

impl Default for ExecTime {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecTime {
    /// Create the extension, initially disabled
    pub fn new() -> Self {
        Self {
            enabled: false,
            origin: Instant::now(),
            parse_start: None,
            exec_start: None,
            end: None,
        }
    }

    /// Whether timing display is enabled
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Register the `exectime` option
    pub fn register(
        ext: &Rc<RefCell<Self>>,
        options: &mut OptionRegistry,
    ) -> Result<(), RegistryError> {
        let handle = Rc::clone(ext);
        options.register(
            "exectime",
            "exectime",
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

    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// Start a new timing cycle at the current instant
    pub fn mark_parse_start(&mut self) {
        let t = self.now();
        self.mark_parse_start_at(t);
    }

    /// Record the execution start at the current instant
    pub fn mark_exec_start(&mut self) {
        let t = self.now();
        self.mark_exec_start_at(t);
    }

    /// Record the end of the cycle at the current instant
    pub fn mark_end(&mut self) {
        let t = self.now();
        self.mark_end_at(t);
    }

    /// Start a new timing cycle at an explicit timestamp
    ///
    /// Clears the execution-start and end marks of the previous cycle.
    pub fn mark_parse_start_at(
        &mut self,
        t: f64,
    ) {
        self.parse_start = Some(t);
        self.exec_start = None;
        self.end = None;
    }

    /// Record the execution start at an explicit timestamp
    pub fn mark_exec_start_at(
        &mut self,
        t: f64,
    ) {
        self.exec_start = Some(t);
    }

    /// Record the end of the cycle at an explicit timestamp
    pub fn mark_end_at(
        &mut self,
        t: f64,
    ) {
        self.end = Some(t);
    }

    /// Seconds from parse start to end, 0.0 while either mark is missing
    pub fn parse_time(&self) -> f64 {
        match (self.parse_start, self.end) {
            (Some(parse), Some(end)) => (end - parse).max(0.0),
            _ => 0.0,
        }
    }

    /// Seconds from execution start to end, 0.0 while either mark is missing
    pub fn exec_time(&self) -> f64 {
        match (self.exec_start, self.end) {
            (Some(exec), Some(end)) => (end - exec).max(0.0),
            _ => 0.0,
        }
    }

    /// One-line timing summary for display
    pub fn summary(&self) -> String {
        format!(
            "parse: {:.3}s, exec: {:.3}s",
            self.parse_time(),
            self.exec_time()
        )
    }
}
