use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parse::parse_assignment;

/// A single parsed `path<operator>value` expression.
///
/// The `value` is kept as the raw string taken from the token; how it is
/// interpreted (literal string, JSON literal, filename) depends on the
/// operator and is decided at application time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    // The dotted path addressing the target, including any []/[]. markers
    pub path: String,
    pub operator: Operator,
    // The raw right-hand side of the assignment
    pub value: String,
}

impl FromStr for Assignment {
    type Err = Error;

    /// Parses a single assignment token.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use je::{Assignment, Operator};
    ///
    /// let assignment: Assignment = "user.name=john".parse().unwrap();
    /// assert_eq!(assignment.operator, Operator::AssignString);
    /// assert_eq!(assignment.path, "user.name");
    /// assert_eq!(assignment.value, "john");
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_assignment(input)
    }
}

/// The eight assignment operators, distinguished by their lexical marker.
///
/// | Kind | Marker | Value semantics |
/// |---|---|---|
/// | `AssignString` | `=` | literal string |
/// | `AssignJson` | `:=` | JSON literal, or delete when the value is empty |
/// | `AssignFile` | `@` | contents of the named file, as a literal string |
/// | `AssignJsonFile` | `:@` | contents of the named file, as a JSON literal |
/// | `AppendArray` | `[]=` | literal string appended to the array |
/// | `AppendArrayJson` | `[]:=` | JSON literal appended to the array |
/// | `ArrayMap` | `[].`prop`=` | literal string set on prop of every element |
/// | `ArrayMapJson` | `[].`prop`:=` | JSON literal set on prop of every element |
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Operator {
    AssignString,
    AssignJson,
    AssignFile,
    AssignJsonFile,
    AppendArray,
    AppendArrayJson,
    ArrayMap,
    ArrayMapJson,
}

/// A single step in a document path: an object key or an array index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PathToken {
    Key(String),
    Index(usize),
}

#[derive(Error, Debug)]
pub enum Error {
    /// The token matched none of the operator grammars.
    #[error("invalid assignment {token:?}: no valid operator found")]
    MalformedAssignment { token: String },

    /// An array-map operation was given a path without a `[].` marker.
    #[error("invalid array map path {path:?}: expected format like 'users.[].property'")]
    InvalidPath { path: String },

    /// An array-shaped operation addressed a path with no node.
    #[error("array path {path:?} does not exist")]
    PathNotFound { path: String },

    /// An array-shaped operation addressed a node that is not an array.
    #[error("path {path:?} is not an array")]
    NotAnArray { path: String },

    /// A `:=`-family value failed to decode as JSON.
    #[error("invalid JSON value {value:?} for path {path:?}")]
    InvalidValue { path: String, value: String },

    /// A file-based operator referenced an unreadable file.
    #[error("failed to read file {file:?} for path {path:?}")]
    FileRead {
        path: String,
        file: String,
        #[source]
        source: std::io::Error,
    },
}
