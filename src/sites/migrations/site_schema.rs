//! Schema 1.0: baseline structure every later migration relies on.

use serde_json::{json, Value};

use super::ensure_prop;
use crate::path::get_prop_mut;

/// Ensures the containers later migrations write into exist, and reduces
/// legacy `{id, title}` group entries to plain ids.
pub fn apply_site_schema(model: &mut Value) {
    ensure_prop(model, "item.properties", json!({}), Value::is_object);
    ensure_prop(model, "item.properties.children", json!([]), Value::is_array);
    ensure_prop(model, "data.values", json!({}), Value::is_object);
    ensure_prop(model, "data.values.pages", json!([]), Value::is_array);
    ensure_prop(model, "data.values.capabilities", json!([]), Value::is_array);

    if let Some(Value::Array(groups)) = get_prop_mut(model, "data.values.groups") {
        let ids: Vec<Value> = groups
            .iter()
            .filter_map(|group| match group {
                Value::String(_) => Some(group.clone()),
                Value::Object(map) => map.get("id").filter(|id| id.is_string()).cloned(),
                _ => None,
            })
            .collect();
        *groups = ids;
    }
}
