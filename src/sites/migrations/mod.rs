//! Individual site migrations, in the order they were introduced.

pub mod basemap;
pub mod capabilities;
pub mod catalog;
pub mod domains;
pub mod event_list_card;
pub mod feeds;
pub mod layout;
pub mod site_schema;
pub mod telemetry;

use serde_json::Value;

use crate::path::{get_prop, set_prop};

/// Writes `default` at `path` unless the current value passes `is_valid`.
pub(crate) fn ensure_prop(model: &mut Value, path: &str, default: Value, is_valid: fn(&Value) -> bool) {
    if !get_prop(model, path).is_some_and(is_valid) {
        set_prop(model, path, default);
    }
}
