//! Documentation lookup
//!
//! This module contains:
//! - [`DocLookup`] - capability trait for introspecting doc text by name
//! - [`DocTarget`] - what a lookup refers to
//! - [`prototypes`] - static fallback docs for built-in functions
//!
//! The shell context implements [`DocLookup`] over its loaded classes and
//! user functions; tests supply their own implementations.

pub mod prototypes;

use crate::shell::context::ShellContext;

/// What a documentation lookup refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTarget<'a> {
    /// A whole class
    Class(&'a str),
    /// A method of a class
    Method {
        /// Owning class
        class: &'a str,
        /// Method name
        method: &'a str,
    },
    /// A property of a class
    Property {
        /// Owning class
        class: &'a str,
        /// Property name
        property: &'a str,
    },
    /// A free function
    Function(&'a str),
}

/// Capability for answering "is this name known, and what are its docs?"
pub trait DocLookup {
    /// Whether a class with this name is loaded
    fn has_class(
        &self,
        name: &str,
    ) -> bool;

    /// Whether a function with this name is defined
    fn has_function(
        &self,
        name: &str,
    ) -> bool;

    /// Doc text for a target, if any is attached
    fn doc(
        &self,
        target: &DocTarget<'_>,
    ) -> Option<String>;
}

impl DocLookup for ShellContext {
    fn has_class(
        &self,
        name: &str,
    ) -> bool {
        self.class_loaded(name)
    }

    fn has_function(
        &self,
        name: &str,
    ) -> bool {
        self.function_defined(name)
    }

    fn doc(
        &self,
        target: &DocTarget<'_>,
    ) -> Option<String> {
        match target {
            DocTarget::Class(name) => self.class_docs(name)?.doc.clone(),
            DocTarget::Method { class, method } => {
                self.class_docs(class)?.methods.get(*method).cloned()
            }
            DocTarget::Property { class, property } => {
                self.class_docs(class)?.properties.get(*property).cloned()
            }
            DocTarget::Function(name) => self.function_doc(name).map(str::to_string),
        }
    }
}
