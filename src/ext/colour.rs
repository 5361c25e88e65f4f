//! Colour extension
//!
//! Named colour schemes mapping semantic roles (`default`, `value`,
//! `exception`, `reset`) to escape sequences, with a single active scheme
//! switched via `:set background=<scheme>` (alias `bg`).

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::shell::context::ShellContext;
use crate::shell::registry::{OptionRegistry, RegistryError, SetOutcome};

const RESET: &str = "\x1b[0m";

/// A colour scheme: role name -> escape sequence
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    roles: IndexMap<String, String>,
}

impl Scheme {
    /// Build a scheme from role/sequence pairs
    ///
    /// A `reset` role is added implicitly when the pairs don't supply one.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut roles = IndexMap::new();
        for (role, seq) in pairs {
            roles.insert((*role).to_string(), (*seq).to_string());
        }
        if !roles.contains_key("reset") {
            roles.insert("reset".to_string(), RESET.to_string());
        }
        Self { roles }
    }

    /// Escape sequence for a role, empty when the role is absent
    pub fn colour(
        &self,
        role: &str,
    ) -> &str {
        self.roles.get(role).map(String::as_str).unwrap_or("")
    }
}

/// Colour scheme registry and active selection
#[derive(Debug)]
pub struct Colour {
    schemes: IndexMap<String, Scheme>,
    active: String,
}

impl Default for Colour {
    fn default() -> Self {
        Self::new()
    }
}

impl Colour {
    /// Create the extension with the built-in schemes, `plain` active
    pub fn new() -> Self {
        let mut ext = Self {
            schemes: IndexMap::new(),
            active: "plain".to_string(),
        };
        ext.register_scheme("plain", Scheme::from_pairs(&[("reset", "")]));
        ext.register_scheme(
            "dark",
            Scheme::from_pairs(&[
                ("default", "\x1b[0;37m"),
                ("value", "\x1b[1;36m"),
                ("exception", "\x1b[1;31m"),
            ]),
        );
        ext.register_scheme(
            "light",
            Scheme::from_pairs(&[
                ("default", "\x1b[0;30m"),
                ("value", "\x1b[0;34m"),
                ("exception", "\x1b[0;31m"),
            ]),
        );
        ext
    }

    /// Register (or replace) a scheme under a name
    pub fn register_scheme(
        &mut self,
        name: &str,
        scheme: Scheme,
    ) {
        self.schemes.insert(name.to_string(), scheme);
    }

    /// Switch the active scheme; false when the name is unknown
    ///
    /// On failure the active scheme is unchanged.
    pub fn apply_scheme(
        &mut self,
        name: &str,
    ) -> bool {
        if !self.schemes.contains_key(name) {
            return false;
        }
        self.active = name.to_string();
        true
    }

    /// Name of the active scheme
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Registered scheme names, in registration order
    pub fn scheme_names(&self) -> Vec<&str> {
        self.schemes.keys().map(String::as_str).collect()
    }

    /// Escape sequence of a role in the active scheme
    pub fn colour(
        &self,
        role: &str,
    ) -> &str {
        self.schemes
            .get(&self.active)
            .map(|s| s.colour(role))
            .unwrap_or("")
    }

    /// Wrap text in a role's escape sequence and the reset sequence
    pub fn paint(
        &self,
        role: &str,
        text: &str,
    ) -> String {
        let seq = self.colour(role);
        if seq.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", seq, text, self.colour("reset"))
        }
    }

    /// Register the `background` option and its `bg` alias
    pub fn register(
        ext: &Rc<RefCell<Self>>,
        options: &mut OptionRegistry,
    ) -> Result<(), RegistryError> {
        let handle = Rc::clone(ext);
        options.register(
            "background",
            "colour",
            Box::new(move |key, value, ctx| handle.borrow_mut().set_option(key, value, ctx)),
        )?;
        options.register_alias("bg", "background")
    }

    fn set_option(
        &mut self,
        key: &str,
        value: Option<&str>,
        _ctx: &mut ShellContext,
    ) -> SetOutcome {
        let name = match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                return SetOutcome::Ignored(format!(
                    "usage: :set {}=<{}>",
                    key,
                    self.scheme_names().join("|")
                ))
            }
        };
        if self.apply_scheme(name) {
            SetOutcome::Applied
        } else {
            SetOutcome::Ignored(format!(
                "unknown colour scheme '{}' (known: {})",
                name,
                self.scheme_names().join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_registered_scheme() {
        let mut ext = Colour::new();
        ext.register_scheme(
            "mono",
            Scheme::from_pairs(&[("value", "\x1b[1m"), ("exception", "\x1b[7m")]),
        );

        assert!(ext.apply_scheme("mono"));
        assert_eq!(ext.active(), "mono");
        assert_eq!(ext.colour("value"), "\x1b[1m");
    }

    #[test]
    fn test_unknown_scheme_leaves_active_unchanged() {
        let mut ext = Colour::new();
        ext.apply_scheme("dark");

        assert!(!ext.apply_scheme("nosuch"));
        assert_eq!(ext.active(), "dark");
    }

    #[test]
    fn test_implicit_reset_role() {
        let scheme = Scheme::from_pairs(&[("value", "\x1b[1;36m")]);
        assert_eq!(scheme.colour("reset"), RESET);

        // An explicit reset is kept as-is
        let plain = Scheme::from_pairs(&[("reset", "")]);
        assert_eq!(plain.colour("reset"), "");
    }

    #[test]
    fn test_paint_plain_is_passthrough() {
        let ext = Colour::new();
        assert_eq!(ext.paint("value", "42"), "42");
    }

    #[test]
    fn test_paint_wraps_with_reset() {
        let mut ext = Colour::new();
        ext.apply_scheme("dark");
        assert_eq!(ext.paint("value", "42"), "\x1b[1;36m42\x1b[0m");
    }

    #[test]
    fn test_set_option_unknown_scheme_message() {
        let mut ext = Colour::new();
        let mut ctx = ShellContext::new();
        ext.apply_scheme("light");

        let outcome = ext.set_option("background", Some("nosuch"), &mut ctx);
        match outcome {
            SetOutcome::Ignored(msg) => {
                assert!(msg.contains("unknown colour scheme 'nosuch'"));
                assert!(msg.contains("dark"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(ext.active(), "light");
    }
}
