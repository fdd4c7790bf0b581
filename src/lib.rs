//! # je
//!
//! A small assignment language for editing JSON documents: tokens of the
//! form `path<operator>value` are parsed into [`Assignment`]s and applied
//! in order against a [`serde_json::Value`] tree.
//!
//! ## Operators
//!
//! - `path=value` sets a literal string.
//! - `path:=value` sets a JSON literal (`30`, `true`, `null`, `{"a":1}`);
//!   an empty value deletes the node.
//! - `path@file` sets the file's contents as a string; `path:@file` sets
//!   the file's contents as JSON.
//! - `path[]=value` / `path[]:=value` append to the array at `path`,
//!   creating it when missing.
//! - `path.[].prop=value` / `path.[].prop:=value` set `prop` on every
//!   element of the array at `path`.
//!
//! Paths are dot-delimited; `\.` escapes a dot inside a key, and segments
//! made of digits address array indices.
//!
//! ## Examples
//!
//! ```rust
//! use serde_json::json;
//!
//! let assignments = je::parse_assignments(["user.name=john", "user.age:=30"]).unwrap();
//! let doc = je::apply_assignments(json!({}), &assignments).unwrap();
//! assert_eq!(doc, json!({"user": {"name": "john", "age": 30}}));
//! ```
//!
//! Array append and per-element mutation:
//!
//! ```rust
//! use serde_json::json;
//!
//! let assignments = je::parse_assignments(["tags[]=new", "items.[].active:=true"]).unwrap();
//! let doc = je::apply_assignments(
//!     json!({"tags": ["old"], "items": [{"active": false}]}),
//!     &assignments,
//! )
//! .unwrap();
//! assert_eq!(doc, json!({"tags": ["old", "new"], "items": [{"active": true}]}));
//! ```

mod apply;
mod manipulators;
mod parse;
mod types;

pub mod diff;
pub mod io;

pub use apply::apply_assignments;
pub use manipulators::set_value;
pub use parse::{parse_assignment, parse_assignments, path_tokens, segments};
pub use types::{Assignment, Error, Operator, PathToken};
