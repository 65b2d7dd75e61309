//! Layered merge of option tables

use serde_json::{Map, Value};

/// Merge `overrides` over `defaults`.
///
/// Objects merge key by key, recursively. Any other override value, `null`
/// and `false` included, replaces the default outright; arrays are not
/// concatenated. Keys only present in `overrides` are carried over.
pub fn merge_default(defaults: &Value, overrides: &Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(base), Value::Object(patch)) => Value::Object(merge_maps(base, patch)),
        (_, patch) => patch.clone(),
    }
}

fn merge_maps(base: &Map<String, Value>, patch: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = Map::with_capacity(base.len().max(patch.len()));
    for (key, default) in base {
        let value = match patch.get(key) {
            Some(over) => merge_default(default, over),
            None => default.clone(),
        };
        merged.insert(key.clone(), value);
    }
    for (key, value) in patch {
        if !base.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
