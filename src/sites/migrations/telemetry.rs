//! Schema 1.4: telemetry settings leave `data.values`.

use serde_json::{json, Value};

use crate::path::{deep_set, delete_prop, get_prop};

/// Telemetry block written when a site has none.
#[must_use]
pub fn default_telemetry() -> Value {
    json!({
        "consentNotice": {
            "isTheme": true,
            "consentText": "",
            "policies": []
        }
    })
}

/// Moves `data.values.telemetry` to `data.telemetry`.
///
/// Top-level keys of the legacy block override the defaults. A site that
/// already has `data.telemetry` keeps it.
pub fn ensure_telemetry(model: &mut Value) {
    let legacy = delete_prop(model, "data.values.telemetry");
    if get_prop(model, "data.telemetry").is_some_and(Value::is_object) {
        return;
    }
    let mut telemetry = default_telemetry();
    if let (Value::Object(defaults), Some(Value::Object(legacy))) = (&mut telemetry, legacy) {
        defaults.extend(legacy);
    }
    deep_set(model, "data.telemetry", telemetry);
}
