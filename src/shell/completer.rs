//! Shell completion
//!
//! Completes option names after `:set `, and variable / built-in function
//! names elsewhere. Variable names are refreshed by the shell loop before
//! each read.

use std::borrow::Cow;

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

use crate::doc::prototypes;

/// rustyline helper for the shell
pub struct ShellHelper {
    options: Vec<String>,
    functions: Vec<String>,
    vars: Vec<String>,
}

impl ShellHelper {
    /// Create a helper completing the given option names
    pub fn new(options: Vec<String>) -> Self {
        let functions = prototypes::PROTOTYPES
            .keys()
            .filter(|name| !name.contains("::"))
            .map(|name| (*name).to_string())
            .collect();
        Self {
            options,
            functions,
            vars: Vec::new(),
        }
    }

    /// Replace the completable variable names
    pub fn set_vars(
        &mut self,
        vars: Vec<String>,
    ) {
        self.vars = vars;
    }

    fn candidates(
        &self,
        line: &str,
        word: &str,
    ) -> Vec<Pair> {
        let mut candidates = Vec::new();

        if line.starts_with(":set ") {
            for opt in &self.options {
                if opt.starts_with(word) {
                    candidates.push(Pair {
                        display: opt.clone(),
                        replacement: opt.clone(),
                    });
                }
            }
            return candidates;
        }

        // $variables
        if let Some(stem) = word.strip_prefix('$') {
            for var in &self.vars {
                if var.starts_with(stem) {
                    candidates.push(Pair {
                        display: format!("${}", var),
                        replacement: format!("${}", var),
                    });
                }
            }
            return candidates;
        }

        // Built-in functions
        if !word.is_empty() {
            for func in &self.functions {
                if func.starts_with(word) {
                    candidates.push(Pair {
                        display: format!("{}()", func),
                        replacement: func.clone(),
                    });
                }
            }
        }

        candidates.sort_by(|a, b| a.replacement.cmp(&b.replacement));
        candidates.dedup_by(|a, b| a.replacement == b.replacement);
        candidates
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Word boundary, keeping `$` attached to the word
        let (start, word) = match line[..pos]
            .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '$')
        {
            Some(i) => (i + 1, &line[i + 1..pos]),
            None => (0, &line[..pos]),
        };
        Ok((start, self.candidates(line, word)))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(
        &self,
        line: &'l str,
        _pos: usize,
    ) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}
