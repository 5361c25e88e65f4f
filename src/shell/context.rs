//! Shell session context
//!
//! Holds the state shared by the evaluator and the extensions: variable
//! bindings, loaded classes with their documentation, user functions, and
//! the installed class-loader hook. Handlers receive `&mut ShellContext`
//! instead of reaching into globals.

use std::fmt;

use indexmap::IndexMap;

/// A runtime value in the scratch evaluator
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    Str(String),
    /// Object instance of a loaded class
    Object {
        /// Class name
        class: String,
    },
}

impl Value {
    /// Short type name for display
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Object { .. } => "object",
        }
    }

    /// Verbose rendering, `var_dump` style
    pub fn verbose(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => format!("bool({})", b),
            Value::Int(i) => format!("int({})", i),
            Value::Float(f) => format!("float({})", f),
            Value::Str(s) => format!("string({}) {:?}", s.len(), s),
            Value::Object { class } => format!("object({})", class),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Object { class } => write!(f, "<{}>", class),
        }
    }
}

/// Documentation attached to a loaded class
#[derive(Debug, Clone, Default)]
pub struct ClassDocs {
    /// Whole-class doc text
    pub doc: Option<String>,
    /// Method name -> doc text
    pub methods: IndexMap<String, String>,
    /// Property name -> doc text
    pub properties: IndexMap<String, String>,
}

/// The installed class-loader hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loader {
    /// The shell's own loader, installed by the autoload extension
    Default,
    /// A loader installed from outside the shell, identified by name
    External(String),
}

/// Shell session context
#[derive(Debug, Default)]
pub struct ShellContext {
    /// Variable environment: name (without `$`) -> value
    variables: IndexMap<String, Value>,
    /// Loaded classes: name -> docs
    classes: IndexMap<String, ClassDocs>,
    /// User functions: name -> doc text
    functions: IndexMap<String, String>,
    /// Installed class loader, if any
    loader: Option<Loader>,
}

impl ShellContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or overwrite a variable
    pub fn define_var(
        &mut self,
        name: impl Into<String>,
        value: Value,
    ) {
        self.variables.insert(name.into(), value);
    }

    /// Get a variable
    pub fn var(
        &self,
        name: &str,
    ) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Runtime class of a variable, when it holds an object
    pub fn var_class(
        &self,
        name: &str,
    ) -> Option<&str> {
        match self.variables.get(name) {
            Some(Value::Object { class }) => Some(class.as_str()),
            _ => None,
        }
    }

    /// Variable names, in definition order
    pub fn var_names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    /// Register a class with its documentation
    pub fn load_class(
        &mut self,
        name: impl Into<String>,
        docs: ClassDocs,
    ) {
        self.classes.insert(name.into(), docs);
    }

    /// Whether a class is loaded
    pub fn class_loaded(
        &self,
        name: &str,
    ) -> bool {
        self.classes.contains_key(name)
    }

    /// Docs of a loaded class
    pub fn class_docs(
        &self,
        name: &str,
    ) -> Option<&ClassDocs> {
        self.classes.get(name)
    }

    /// Register a user function with its doc text
    pub fn define_function(
        &mut self,
        name: impl Into<String>,
        doc: impl Into<String>,
    ) {
        self.functions.insert(name.into(), doc.into());
    }

    /// Whether a user function is defined
    pub fn function_defined(
        &self,
        name: &str,
    ) -> bool {
        self.functions.contains_key(name)
    }

    /// Doc text of a user function
    pub fn function_doc(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.functions.get(name).map(String::as_str)
    }

    /// The installed loader, if any
    pub fn loader(&self) -> Option<&Loader> {
        self.loader.as_ref()
    }

    /// Whether an externally supplied loader is installed
    pub fn has_external_loader(&self) -> bool {
        matches!(self.loader, Some(Loader::External(_)))
    }

    /// Install the shell's default loader
    pub fn install_default_loader(&mut self) {
        self.loader = Some(Loader::Default);
    }

    /// Install an external loader by name
    pub fn install_external_loader(
        &mut self,
        name: impl Into<String>,
    ) {
        self.loader = Some(Loader::External(name.into()));
    }
}
