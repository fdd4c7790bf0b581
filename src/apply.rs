use std::fs;

use serde_json::Value;

use crate::manipulators::{pointer, set_value};
use crate::parse::path_tokens;
use crate::types::{Assignment, Error, Operator, PathToken};

/// Applies a list of assignments to a document, in order.
///
/// The document is threaded through as an owned value: each assignment
/// operates on the output of the previous one, and the first failure aborts
/// the whole run, so a partially applied batch is never observable.
///
/// ## Example
///
/// ```rust
/// use serde_json::json;
///
/// let assignments = je::parse_assignments(["user.name=john", "user.age:=30"]).unwrap();
/// let doc = je::apply_assignments(json!({}), &assignments).unwrap();
/// assert_eq!(doc, json!({"user": {"name": "john", "age": 30}}));
/// ```
pub fn apply_assignments(mut doc: Value, assignments: &[Assignment]) -> Result<Value, Error> {
    for assignment in assignments {
        assignment.apply_to(&mut doc)?;
    }
    Ok(doc)
}

impl Assignment {
    /// Applies this assignment to the document.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use je::Assignment;
    /// use serde_json::json;
    ///
    /// let mut doc = json!({"tags": ["old"]});
    /// let assignment: Assignment = "tags[]=new".parse().unwrap();
    /// assignment.apply_to(&mut doc).unwrap();
    /// assert_eq!(doc, json!({"tags": ["old", "new"]}));
    /// ```
    pub fn apply_to(&self, doc: &mut Value) -> Result<(), Error> {
        log::debug!("applying {:?} at {}", self.operator, self.path);

        match self.operator {
            Operator::AssignString => {
                set_value(doc, &path_tokens(&self.path), Value::String(self.value.clone()));
            }
            Operator::AssignJson => {
                if self.value.is_empty() {
                    // Empty value means delete; a missing path is a no-op.
                    let _ = pointer(&path_tokens(&self.path)).delete(doc);
                } else {
                    let value = decode_value(&self.path, &self.value)?;
                    set_value(doc, &path_tokens(&self.path), value);
                }
            }
            Operator::AssignFile => {
                let content = self.read_value_file()?;
                set_value(doc, &path_tokens(&self.path), Value::String(content));
            }
            Operator::AssignJsonFile => {
                let content = self.read_value_file()?;
                let value: Value =
                    serde_json::from_str(&content).map_err(|_| Error::InvalidValue {
                        path: self.path.clone(),
                        value: self.value.clone(),
                    })?;
                set_value(doc, &path_tokens(&self.path), value);
            }
            Operator::AppendArray => {
                append_to_array(doc, &self.path, Value::String(self.value.clone()))?;
            }
            Operator::AppendArrayJson => {
                let value = decode_value(&self.path, &self.value)?;
                append_to_array(doc, &self.path, value)?;
            }
            Operator::ArrayMap => {
                map_array_elements(doc, &self.path, Value::String(self.value.clone()))?;
            }
            Operator::ArrayMapJson => {
                let value = decode_value(&self.path, &self.value)?;
                map_array_elements(doc, &self.path, value)?;
            }
        }

        Ok(())
    }

    fn read_value_file(&self) -> Result<String, Error> {
        fs::read_to_string(&self.value).map_err(|source| Error::FileRead {
            path: self.path.clone(),
            file: self.value.clone(),
            source,
        })
    }
}

/// Decodes a `:=`-family value: full JSON parse first, then the bare words
/// null/true/false (case-insensitive), then a finite number.
fn decode_value(path: &str, raw: &str) -> Result<Value, Error> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Ok(value);
    }

    match raw.to_ascii_lowercase().as_str() {
        "null" => Ok(Value::Null),
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| Error::InvalidValue {
                path: path.to_string(),
                value: raw.to_string(),
            }),
    }
}

/// Appends a value to the array at the path (minus its trailing `[]`
/// marker), creating the array when nothing exists there yet.
fn append_to_array(doc: &mut Value, path: &str, value: Value) -> Result<(), Error> {
    let base = path.strip_suffix("[]").unwrap_or(path);
    let mut tokens = path_tokens(base);

    let next = match pointer(&tokens).resolve(&*doc) {
        Ok(Value::Array(items)) => items.len(),
        Ok(_) => {
            return Err(Error::NotAnArray {
                path: base.to_string(),
            })
        }
        // Nothing there yet: the set below creates the array.
        Err(_) => 0,
    };

    tokens.push(PathToken::Index(next));
    set_value(doc, &tokens, value);
    Ok(())
}

/// Sets a property on every element of the array addressed by the path
/// prefix before the `[].` marker. An empty array is a valid no-op.
fn map_array_elements(doc: &mut Value, path: &str, value: Value) -> Result<(), Error> {
    let Some(marker) = path.find("[].") else {
        return Err(Error::InvalidPath {
            path: path.to_string(),
        });
    };
    let base = &path[..marker];
    let base = base.strip_suffix('.').unwrap_or(base);
    let property = &path[marker + 3..];

    let base_tokens = path_tokens(base);
    let len = match pointer(&base_tokens).resolve(&*doc) {
        Ok(Value::Array(items)) => items.len(),
        Ok(_) => {
            return Err(Error::NotAnArray {
                path: base.to_string(),
            })
        }
        Err(_) => {
            return Err(Error::PathNotFound {
                path: base.to_string(),
            })
        }
    };

    let property_tokens = path_tokens(property);
    for index in 0..len {
        let mut tokens = base_tokens.clone();
        tokens.push(PathToken::Index(index));
        tokens.extend(property_tokens.iter().cloned());
        set_value(doc, &tokens, value.clone());
    }

    Ok(())
}
