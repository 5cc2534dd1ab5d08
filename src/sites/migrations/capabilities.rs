//! Schema 1.7: legacy capability flags become feature toggles.
//!
//! Legacy capabilities disable things (`hideFollow`), features enable them
//! (`hub:site:feature:follow`), so every value is inverted both ways.

use serde_json::{json, Map, Value};

use crate::path::{deep_set, get_prop, get_prop_mut};

const CAPABILITIES_PATH: &str = "data.values.capabilities";
const FEATURES_PATH: &str = "data.settings.features";

/// Legacy capability and the feature it became.
pub const CAPABILITY_FEATURES: &[(&str, &str)] = &[
    ("hideFollow", "hub:site:feature:follow"),
    ("disableDiscussions", "hub:site:feature:discussions"),
];

pub fn migrate_legacy_capabilities_to_features(model: &mut Value) {
    let capabilities: Vec<String> = get_prop(model, CAPABILITIES_PATH)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    let features: Map<String, Value> = CAPABILITY_FEATURES
        .iter()
        .map(|(capability, feature)| {
            let disabled = capabilities.iter().any(|c| c == capability);
            ((*feature).to_string(), Value::Bool(!disabled))
        })
        .collect();
    deep_set(model, FEATURES_PATH, Value::Object(features));

    if let Some(Value::Array(items)) = get_prop_mut(model, CAPABILITIES_PATH) {
        items.retain(|item| {
            !item
                .as_str()
                .is_some_and(|c| CAPABILITY_FEATURES.iter().any(|(legacy, _)| *legacy == c))
        });
    }
}

/// Rebuilds the legacy capability list from a `features` map for callers
/// that still read `data.values.capabilities`.
///
/// Only explicitly disabled features produce a capability.
#[must_use]
pub fn convert_features_to_legacy_capabilities(features: &Value) -> Value {
    let capabilities: Vec<Value> = CAPABILITY_FEATURES
        .iter()
        .filter(|(_, feature)| features.get(*feature).and_then(Value::as_bool) == Some(false))
        .map(|(capability, _)| json!(capability))
        .collect();
    Value::Array(capabilities)
}
