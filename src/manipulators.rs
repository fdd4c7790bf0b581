use jsonptr::{PointerBuf, Token};
use serde_json::{Map, Value};

use crate::types::PathToken;

/// Sets a value at the given path tokens, creating intermediate nodes along
/// the way: key steps create objects, index steps create arrays. An index
/// beyond the end of an existing array extends it, filling the intervening
/// slots with null. A non-matching intermediate node is replaced.
///
/// ## Example
///
/// ```rust
/// use je::PathToken;
/// use serde_json::json;
///
/// let mut doc = json!({});
/// je::set_value(
///     &mut doc,
///     &[PathToken::Key("tags".into()), PathToken::Index(1)],
///     json!("ci"),
/// );
/// assert_eq!(doc, json!({"tags": [null, "ci"]}));
/// ```
pub fn set_value(node: &mut Value, tokens: &[PathToken], value: Value) {
    let Some((head, tail)) = tokens.split_first() else {
        *node = value;
        return;
    };

    match head {
        PathToken::Key(key) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let entry = node
                .as_object_mut()
                .unwrap()
                .entry(key.clone())
                .or_insert(Value::Null);
            set_value(entry, tail, value);
        }
        PathToken::Index(index) => {
            if !node.is_array() {
                *node = Value::Array(Vec::new());
            }
            let items = node.as_array_mut().unwrap();
            if *index >= items.len() {
                items.resize(*index + 1, Value::Null);
            }
            set_value(&mut items[*index], tail, value);
        }
    }
}

/// Builds a JSON Pointer addressing the same location as the path tokens.
/// Used for resolution and deletion, where no auto-creation is wanted.
pub(crate) fn pointer(tokens: &[PathToken]) -> PointerBuf {
    PointerBuf::from_tokens(tokens.iter().map(|token| match token {
        PathToken::Key(key) => Token::new(key.as_str()),
        PathToken::Index(index) => Token::new(index.to_string()),
    }))
}
