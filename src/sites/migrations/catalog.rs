//! Schema 1.2 and 1.3: the site catalog.

use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::path::{delete_prop, get_prop, get_prop_mut, set_prop};

const LEGACY_GROUPS_PATH: &str = "data.values.groups";
const CATALOG_PATH: &str = "data.catalog";
const CATALOG_GROUPS_PATH: &str = "data.catalog.groups";

/// Moves the legacy group list under `data.catalog`.
///
/// An existing catalog wins; the legacy list is dropped either way.
pub fn ensure_catalog(model: &mut Value) {
    let groups = delete_prop(model, LEGACY_GROUPS_PATH);
    if get_prop(model, CATALOG_PATH).is_some_and(Value::is_object) {
        return;
    }
    let groups = match groups {
        Some(groups @ Value::Array(_)) => groups,
        _ => json!([]),
    };
    set_prop(model, CATALOG_PATH, json!({ "groups": groups }));
}

/// Drops catalog group entries that are not GUIDs.
pub fn purge_non_guids_from_catalog(model: &mut Value) {
    let Some(Value::Array(groups)) = get_prop_mut(model, CATALOG_GROUPS_PATH) else {
        return;
    };
    let before = groups.len();
    groups.retain(|group| group.as_str().is_some_and(is_guid));
    let purged = before - groups.len();
    if purged > 0 {
        warn!(purged, "removed non-GUID catalog groups");
    }
}

/// True for 32 hex digits, with or without the four hyphens.
#[must_use]
pub fn is_guid(candidate: &str) -> bool {
    matches!(candidate.len(), 32 | 36) && Uuid::try_parse(candidate).is_ok()
}
