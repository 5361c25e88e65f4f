//! Inline help extension
//!
//! Resolves `? <expression>` queries against the prototype table and the
//! context's documentation, and turns a bare `?` into the general help
//! screen. The expression is matched against a fixed list of shapes, in
//! order; the first match wins and the rest are skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::doc::prototypes;
use crate::doc::{DocLookup, DocTarget};
use crate::shell::context::ShellContext;
use crate::shell::registry::{CommandOutcome, CommandRegistry, RegistryError};

// Query shapes, tried in this order
static RE_STATIC_METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_]\w*)::(\w+)\(\)$").unwrap());
static RE_OBJECT_METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$([A-Za-z_]\w*)->(\w+)\(\)$").unwrap());
static RE_STATIC_PROPERTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_]\w*)::\$?(\w+)$").unwrap());
static RE_OBJECT_PROPERTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$([A-Za-z_]\w*)->(\w+)$").unwrap());
static RE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z_]\w*)$").unwrap());
static RE_VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$([A-Za-z_]\w*)$").unwrap());
static RE_FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z_]\w*)\(\)$").unwrap());

/// Inline help resolver
#[derive(Debug, Default)]
pub struct InlineHelp;

impl InlineHelp {
    /// Register the `? <expr>` and bare `?` commands
    pub fn register(commands: &mut CommandRegistry) -> Result<(), RegistryError> {
        commands.register(
            r"^\?\s+\S",
            "help",
            "? <expr>",
            "show documentation for an expression",
            Box::new(|line, ctx| {
                let query = line[1..].trim();
                CommandOutcome::Text(InlineHelp::resolve(query, ctx))
            }),
        )?;
        commands.register(
            r"^\?$",
            "help",
            "?",
            "show this help screen",
            Box::new(|_, _| CommandOutcome::Help),
        )
    }

    /// Resolve a help query to displayable doc text
    ///
    /// Unresolvable queries produce a "no help found" message, never an
    /// error.
    pub fn resolve(
        query: &str,
        ctx: &ShellContext,
    ) -> String {
        let query = query.trim();
        Self::try_resolve(query, ctx)
            .unwrap_or_else(|| format!("no help found for '{}'", query))
    }

    fn try_resolve(
        query: &str,
        ctx: &ShellContext,
    ) -> Option<String> {
        // Class::method() - prototype table first, then loaded-class docs
        if let Some(caps) = RE_STATIC_METHOD.captures(query) {
            let (class, method) = (&caps[1], &caps[2]);
            let key = format!("{}::{}", class, method);
            if let Some(proto) = prototypes::lookup(&key) {
                return Some(proto.render());
            }
            if ctx.has_class(class) {
                return ctx.doc(&DocTarget::Method { class, method });
            }
            return None;
        }

        // $var->method() - the variable must hold a live object
        if let Some(caps) = RE_OBJECT_METHOD.captures(query) {
            let class = ctx.var_class(&caps[1])?;
            return ctx.doc(&DocTarget::Method {
                class,
                method: &caps[2],
            });
        }

        // Class::property - no prototype fallback
        if let Some(caps) = RE_STATIC_PROPERTY.captures(query) {
            let (class, property) = (&caps[1], &caps[2]);
            if !ctx.has_class(class) {
                return None;
            }
            return ctx.doc(&DocTarget::Property { class, property });
        }

        // $var->property
        if let Some(caps) = RE_OBJECT_PROPERTY.captures(query) {
            let class = ctx.var_class(&caps[1])?;
            return ctx.doc(&DocTarget::Property {
                class,
                property: &caps[2],
            });
        }

        // Class alone
        if let Some(caps) = RE_CLASS.captures(query) {
            let class = &caps[1];
            if !ctx.has_class(class) {
                return None;
            }
            return ctx.doc(&DocTarget::Class(class));
        }

        // $var alone - docs of the object's runtime class
        if let Some(caps) = RE_VARIABLE.captures(query) {
            let class = ctx.var_class(&caps[1])?;
            return ctx.doc(&DocTarget::Class(class));
        }

        // function() - prototype table first, then defined-function docs
        if let Some(caps) = RE_FUNCTION.captures(query) {
            let name = &caps[1];
            if let Some(proto) = prototypes::lookup(name) {
                return Some(proto.render());
            }
            if ctx.has_function(name) {
                return ctx.doc(&DocTarget::Function(name));
            }
            return None;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::context::{ClassDocs, Value};

    fn ctx_with_request_class() -> ShellContext {
        let mut ctx = ShellContext::new();
        let mut docs = ClassDocs {
            doc: Some("An HTTP request.".to_string()),
            ..ClassDocs::default()
        };
        docs.methods
            .insert("send".to_string(), "Send the request.".to_string());
        docs.properties
            .insert("url".to_string(), "Target URL.".to_string());
        ctx.load_class("Request", docs);
        ctx.define_var("req", Value::Object { class: "Request".into() });
        ctx
    }

    #[test]
    fn test_prototype_function_query() {
        let ctx = ShellContext::new();
        let out = InlineHelp::resolve("strlen()", &ctx);
        assert!(out.contains("Returns the length"));
        assert!(out.contains("@param"));
        assert!(out.contains("@return"));
    }

    #[test]
    fn test_unknown_function_not_found() {
        let ctx = ShellContext::new();
        assert_eq!(
            InlineHelp::resolve("nonexistentFunc()", &ctx),
            "no help found for 'nonexistentFunc()'"
        );
    }

    #[test]
    fn test_static_method_prototype_lookup() {
        let ctx = ShellContext::new();
        let out = InlineHelp::resolve("DateTime::createFromFormat()", &ctx);
        assert!(out.contains("Parses a time string"));
    }

    #[test]
    fn test_loaded_class_method_query() {
        let ctx = ctx_with_request_class();
        assert_eq!(
            InlineHelp::resolve("Request::send()", &ctx),
            "Send the request."
        );
    }

    #[test]
    fn test_object_method_query() {
        let ctx = ctx_with_request_class();
        assert_eq!(
            InlineHelp::resolve("$req->send()", &ctx),
            "Send the request."
        );
    }

    #[test]
    fn test_object_property_query() {
        let ctx = ctx_with_request_class();
        assert_eq!(InlineHelp::resolve("$req->url", &ctx), "Target URL.");
    }

    #[test]
    fn test_static_property_query() {
        let ctx = ctx_with_request_class();
        assert_eq!(InlineHelp::resolve("Request::url", &ctx), "Target URL.");
        assert_eq!(InlineHelp::resolve("Request::$url", &ctx), "Target URL.");
    }

    #[test]
    fn test_class_query() {
        let ctx = ctx_with_request_class();
        assert_eq!(InlineHelp::resolve("Request", &ctx), "An HTTP request.");
    }

    #[test]
    fn test_variable_query_uses_runtime_class() {
        let ctx = ctx_with_request_class();
        assert_eq!(InlineHelp::resolve("$req", &ctx), "An HTTP request.");
    }

    #[test]
    fn test_non_object_variable_not_found() {
        let mut ctx = ShellContext::new();
        ctx.define_var("n", Value::Int(7));
        assert_eq!(
            InlineHelp::resolve("$n->foo()", &ctx),
            "no help found for '$n->foo()'"
        );
        assert_eq!(InlineHelp::resolve("$n", &ctx), "no help found for '$n'");
    }

    #[test]
    fn test_defined_function_fallback() {
        let mut ctx = ShellContext::new();
        ctx.define_function("greet", "Say hello.");
        assert_eq!(InlineHelp::resolve("greet()", &ctx), "Say hello.");
    }

    #[test]
    fn test_garbage_query_not_found() {
        let ctx = ShellContext::new();
        assert_eq!(
            InlineHelp::resolve("1 + 2", &ctx),
            "no help found for '1 + 2'"
        );
    }

    #[test]
    fn test_method_with_no_doc_not_found() {
        let mut ctx = ShellContext::new();
        ctx.load_class("Bare", ClassDocs::default());
        assert_eq!(
            InlineHelp::resolve("Bare::run()", &ctx),
            "no help found for 'Bare::run()'"
        );
    }
}
