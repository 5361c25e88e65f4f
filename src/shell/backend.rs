//! Evaluation backends
//!
//! The shell drives any [`ShellBackend`]. The bundled [`ScratchBackend`]
//! is a small assignment/echo evaluator - enough to exercise the
//! extensions interactively without a full language implementation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ext::AutoloadDebug;
use crate::shell::context::{ClassDocs, Loader, ShellContext, Value};

/// Evaluation result
#[derive(Debug)]
pub enum EvalResult {
    /// Evaluation produced a value
    Value(Value),
    /// Evaluation produced no value
    Ok,
    /// Evaluation had an error
    Error(String),
}

/// Evaluation backend driven by the shell
pub trait ShellBackend {
    /// Evaluate a complete input chunk
    fn eval(
        &mut self,
        code: &str,
        ctx: &mut ShellContext,
    ) -> EvalResult;
}

/// Scratch evaluator
///
/// Understands `$name = <literal>` bindings, `$name` reads, bare literals,
/// and `new Class` instantiation through the context's loader hook.
#[derive(Default)]
pub struct ScratchBackend {
    autoload_debug: Option<Rc<RefCell<AutoloadDebug>>>,
}

impl ScratchBackend {
    /// Create a backend without load tracing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that reports load operations to the debug extension
    pub fn with_autoload_debug(debug: Rc<RefCell<AutoloadDebug>>) -> Self {
        Self {
            autoload_debug: Some(debug),
        }
    }

    fn literal(
        &mut self,
        expr: &str,
        ctx: &mut ShellContext,
    ) -> Result<Value, String> {
        let expr = expr.trim();
        match expr {
            "null" => return Ok(Value::Null),
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }
        if let Ok(i) = expr.parse::<i64>() {
            return Ok(Value::Int(i));
        }
        if let Ok(f) = expr.parse::<f64>() {
            return Ok(Value::Float(f));
        }
        if let Some(inner) = strip_quotes(expr) {
            return Ok(Value::Str(inner.to_string()));
        }
        if let Some(class) = expr.strip_prefix("new ") {
            return self.instantiate(class.trim(), ctx);
        }
        Err(format!("parse error: '{}'", expr))
    }

    fn instantiate(
        &mut self,
        class: &str,
        ctx: &mut ShellContext,
    ) -> Result<Value, String> {
        if !is_ident(class) {
            return Err(format!("invalid class name '{}'", class));
        }
        if !ctx.class_loaded(class) {
            match ctx.loader() {
                Some(Loader::Default) => {
                    if let Some(debug) = &self.autoload_debug {
                        debug.borrow_mut().enter(class);
                    }
                    ctx.load_class(class, ClassDocs::default());
                    if let Some(debug) = &self.autoload_debug {
                        debug.borrow_mut().leave(class);
                    }
                }
                _ => return Err(format!("class '{}' is not loaded", class)),
            }
        }
        Ok(Value::Object {
            class: class.to_string(),
        })
    }
}

impl ShellBackend for ScratchBackend {
    fn eval(
        &mut self,
        code: &str,
        ctx: &mut ShellContext,
    ) -> EvalResult {
        let code = code.trim();
        if code.is_empty() {
            return EvalResult::Ok;
        }

        // $name = <literal>
        if let Some((lhs, rhs)) = code.split_once('=') {
            let lhs = lhs.trim();
            if let Some(name) = lhs.strip_prefix('$') {
                if !is_ident(name) {
                    return EvalResult::Error(format!("invalid variable name '{}'", lhs));
                }
                return match self.literal(rhs, ctx) {
                    Ok(value) => {
                        ctx.define_var(name, value.clone());
                        EvalResult::Value(value)
                    }
                    Err(e) => EvalResult::Error(e),
                };
            }
        }

        // $name
        if let Some(name) = code.strip_prefix('$') {
            if is_ident(name) {
                return match ctx.var(name) {
                    Some(value) => EvalResult::Value(value.clone()),
                    None => EvalResult::Error(format!("undefined variable '${}'", name)),
                };
            }
        }

        match self.literal(code, ctx) {
            Ok(value) => EvalResult::Value(value),
            Err(e) => EvalResult::Error(e),
        }
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn strip_quotes(s: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return Some(&s[1..s.len() - 1]);
        }
    }
    None
}
