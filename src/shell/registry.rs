//! Shared registries for shell extensions
//!
//! Extensions contribute two kinds of entry points:
//!
//! - [`OptionRegistry`] - named options set via `:set name=value`
//! - [`CommandRegistry`] - line-prefix commands matched against raw input
//!
//! Both registries store closures directly; handlers receive the shell
//! context so they can inspect or mutate session state.

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

use crate::shell::context::ShellContext;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("option '{0}' is already registered")]
    DuplicateOption(String),

    #[error("alias '{0}' is already registered")]
    DuplicateAlias(String),

    #[error("alias '{alias}' refers to unknown option '{canonical}'")]
    UnknownCanonical { alias: String, canonical: String },

    #[error("invalid command pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Outcome of an option setter
///
/// `Ignored` carries the user-facing message; the option's state is
/// guaranteed unchanged in that case.
#[derive(Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// The value was recognized and applied
    Applied,
    /// The value was not applied; message explains why
    Ignored(String),
}

/// Outcome of a command handler
#[derive(Debug)]
pub enum CommandOutcome {
    /// Text to display
    Text(String),
    /// Lines to replay through the shell, one at a time
    Lines(Vec<String>),
    /// Render the general help screen
    Help,
    /// Exit the shell
    Exit,
    /// Nothing to display
    Silent,
}

/// Option handler: `(key, value, context) -> outcome`
///
/// `value` is `None` when the user typed a bare `:set name`.
pub type OptionHandler = Box<dyn FnMut(&str, Option<&str>, &mut ShellContext) -> SetOutcome>;

/// Command handler: `(full input line, context) -> outcome`
pub type CommandHandler = Box<dyn FnMut(&str, &mut ShellContext) -> CommandOutcome>;

struct OptionEntry {
    owner: String,
    handler: OptionHandler,
}

/// Registry of `:set` options
///
/// Canonical names map to handlers; aliases map to canonical names. An
/// alias always resolves to exactly one canonical option.
#[derive(Default)]
pub struct OptionRegistry {
    options: IndexMap<String, OptionEntry>,
    aliases: IndexMap<String, String>,
}

impl OptionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option under its canonical name
    pub fn register(
        &mut self,
        name: &str,
        owner: &str,
        handler: OptionHandler,
    ) -> Result<(), RegistryError> {
        if self.options.contains_key(name) {
            return Err(RegistryError::DuplicateOption(name.to_string()));
        }
        self.options.insert(
            name.to_string(),
            OptionEntry {
                owner: owner.to_string(),
                handler,
            },
        );
        Ok(())
    }

    /// Register an alias for an already-registered option
    pub fn register_alias(
        &mut self,
        alias: &str,
        canonical: &str,
    ) -> Result<(), RegistryError> {
        if self.aliases.contains_key(alias) || self.options.contains_key(alias) {
            return Err(RegistryError::DuplicateAlias(alias.to_string()));
        }
        if !self.options.contains_key(canonical) {
            return Err(RegistryError::UnknownCanonical {
                alias: alias.to_string(),
                canonical: canonical.to_string(),
            });
        }
        self.aliases
            .insert(alias.to_string(), canonical.to_string());
        Ok(())
    }

    /// Resolve a name or alias to its canonical option name
    pub fn resolve(
        &self,
        name: &str,
    ) -> Option<&str> {
        if let Some((key, _)) = self.options.get_key_value(name) {
            return Some(key.as_str());
        }
        self.aliases.get(name).map(String::as_str)
    }

    /// Dispatch `:set name[=value]` to the owning handler
    ///
    /// Unknown names produce an `Ignored` outcome; no handler runs.
    pub fn set(
        &mut self,
        name: &str,
        value: Option<&str>,
        ctx: &mut ShellContext,
    ) -> SetOutcome {
        let canonical = match self.resolve(name) {
            Some(c) => c.to_string(),
            None => return SetOutcome::Ignored(format!("unknown option '{}'", name)),
        };
        match self.options.get_mut(&canonical) {
            Some(entry) => (entry.handler)(&canonical, value, ctx),
            None => SetOutcome::Ignored(format!("unknown option '{}'", name)),
        }
    }

    /// Canonical option names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Aliases registered for a canonical name, in registration order
    pub fn aliases_of(
        &self,
        canonical: &str,
    ) -> Vec<&str> {
        self.aliases
            .iter()
            .filter(|(_, c)| c.as_str() == canonical)
            .map(|(a, _)| a.as_str())
            .collect()
    }

    /// Owner label of a canonical option
    pub fn owner_of(
        &self,
        canonical: &str,
    ) -> Option<&str> {
        self.options.get(canonical).map(|e| e.owner.as_str())
    }
}

struct CommandEntry {
    pattern: Regex,
    owner: String,
    usage: String,
    help: String,
    handler: CommandHandler,
}

/// Registry of line-prefix commands
///
/// Entries are tried in registration order; the first pattern that matches
/// the input line wins.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command
    pub fn register(
        &mut self,
        pattern: &str,
        owner: &str,
        usage: &str,
        help: &str,
        handler: CommandHandler,
    ) -> Result<(), RegistryError> {
        let pattern_re = Regex::new(pattern).map_err(|source| RegistryError::BadPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.entries.push(CommandEntry {
            pattern: pattern_re,
            owner: owner.to_string(),
            usage: usage.to_string(),
            help: help.to_string(),
            handler,
        });
        Ok(())
    }

    /// Dispatch a line to the first matching command
    ///
    /// Returns `None` when no pattern matches, in which case the line is
    /// ordinary input for the evaluator.
    pub fn dispatch(
        &mut self,
        line: &str,
        ctx: &mut ShellContext,
    ) -> Option<CommandOutcome> {
        for entry in &mut self.entries {
            if entry.pattern.is_match(line) {
                return Some((entry.handler)(line, ctx));
            }
        }
        None
    }

    /// `(usage, help, owner)` rows for the help screen, in registration order
    pub fn help_rows(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.usage.as_str(), e.help.as_str(), e.owner.as_str()))
    }
}
