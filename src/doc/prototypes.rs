//! Prototype table
//!
//! Static fallback documentation for built-in functions that have no
//! inspectable doc text of their own. Keys are either a bare function name
//! or `Class::method` for static methods.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// A documented parameter
#[derive(Debug, Clone, Copy)]
pub struct Param {
    /// Parameter name, with sigil
    pub name: &'static str,
    /// Declared type
    pub ty: &'static str,
    /// One-line description
    pub doc: &'static str,
}

/// Prototype documentation for one built-in
#[derive(Debug, Clone, Copy)]
pub struct Prototype {
    /// Lookup key (`strlen`, `DateTime::createFromFormat`, ...)
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Parameters, in order
    pub params: &'static [Param],
    /// Return type and meaning
    pub ret: &'static str,
}

impl Prototype {
    /// Render the prototype as a displayable doc block
    pub fn render(&self) -> String {
        let args = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("{}({})\n  {}\n", self.name, args, self.description);
        for p in self.params {
            out.push_str(&format!("  @param  {} {}  {}\n", p.ty, p.name, p.doc));
        }
        out.push_str(&format!("  @return {}", self.ret));
        out
    }
}

/// The prototype table
pub static PROTOTYPES: Lazy<IndexMap<&'static str, Prototype>> = Lazy::new(|| {
    let mut table = IndexMap::new();
    for proto in BUILTINS {
        table.insert(proto.name, *proto);
    }
    table
});

/// Look up a prototype by key
pub fn lookup(name: &str) -> Option<&'static Prototype> {
    PROTOTYPES.get(name)
}

const BUILTINS: &[Prototype] = &[
    Prototype {
        name: "strlen",
        description: "Returns the length of the given string.",
        params: &[Param {
            name: "$string",
            ty: "string",
            doc: "the string being measured",
        }],
        ret: "int - the length in bytes",
    },
    Prototype {
        name: "count",
        description: "Counts the elements of an array or countable object.",
        params: &[Param {
            name: "$value",
            ty: "array",
            doc: "the array or countable",
        }],
        ret: "int - the number of elements",
    },
    Prototype {
        name: "sprintf",
        description: "Returns a formatted string.",
        params: &[
            Param {
                name: "$format",
                ty: "string",
                doc: "the format string",
            },
            Param {
                name: "$values",
                ty: "mixed",
                doc: "values substituted into the format",
            },
        ],
        ret: "string - the formatted result",
    },
    Prototype {
        name: "implode",
        description: "Joins array elements with a separator string.",
        params: &[
            Param {
                name: "$separator",
                ty: "string",
                doc: "placed between elements",
            },
            Param {
                name: "$array",
                ty: "array",
                doc: "the elements to join",
            },
        ],
        ret: "string - the joined string",
    },
    Prototype {
        name: "explode",
        description: "Splits a string by a separator string.",
        params: &[
            Param {
                name: "$separator",
                ty: "string",
                doc: "the boundary string",
            },
            Param {
                name: "$string",
                ty: "string",
                doc: "the input string",
            },
        ],
        ret: "array - the split pieces",
    },
    Prototype {
        name: "substr",
        description: "Returns part of a string.",
        params: &[
            Param {
                name: "$string",
                ty: "string",
                doc: "the input string",
            },
            Param {
                name: "$offset",
                ty: "int",
                doc: "start position, negative counts from the end",
            },
            Param {
                name: "$length",
                ty: "?int",
                doc: "maximum length of the returned part",
            },
        ],
        ret: "string - the extracted part",
    },
    Prototype {
        name: "str_replace",
        description: "Replaces all occurrences of a search string.",
        params: &[
            Param {
                name: "$search",
                ty: "string",
                doc: "the value being searched for",
            },
            Param {
                name: "$replace",
                ty: "string",
                doc: "the replacement value",
            },
            Param {
                name: "$subject",
                ty: "string",
                doc: "the string being searched",
            },
        ],
        ret: "string - the subject with replacements applied",
    },
    Prototype {
        name: "in_array",
        description: "Checks whether a value exists in an array.",
        params: &[
            Param {
                name: "$needle",
                ty: "mixed",
                doc: "the searched value",
            },
            Param {
                name: "$haystack",
                ty: "array",
                doc: "the array to search",
            },
        ],
        ret: "bool - true when found",
    },
    Prototype {
        name: "array_keys",
        description: "Returns all the keys of an array.",
        params: &[Param {
            name: "$array",
            ty: "array",
            doc: "the input array",
        }],
        ret: "array - the keys, reindexed",
    },
    Prototype {
        name: "gettype",
        description: "Returns the type name of a value.",
        params: &[Param {
            name: "$value",
            ty: "mixed",
            doc: "the value being inspected",
        }],
        ret: "string - the type name",
    },
    Prototype {
        name: "DateTime::createFromFormat",
        description: "Parses a time string according to a format.",
        params: &[
            Param {
                name: "$format",
                ty: "string",
                doc: "the expected format",
            },
            Param {
                name: "$datetime",
                ty: "string",
                doc: "the time string to parse",
            },
        ],
        ret: "DateTime|false - the parsed instance, or false on failure",
    },
];
