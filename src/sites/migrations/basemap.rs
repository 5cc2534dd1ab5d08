//! Repairs `data.map.basemaps.primary` written without a layer list.
//!
//! Some sites stored a single layer object as the primary basemap, others
//! stored garbage. Both were saved under several schema versions, so this
//! runs on every load.

use serde_json::{json, Value};

use crate::path::{get_prop, set_prop};

const PRIMARY_BASEMAP_PATH: &str = "data.map.basemaps.primary";

/// Topographic basemap used when the stored one cannot be salvaged.
#[must_use]
pub fn default_basemap() -> Value {
    json!({
        "title": "Topographic",
        "baseMapLayers": [{
            "id": "defaultBasemap",
            "layerType": "ArcGISTiledMapServiceLayer",
            "url": "https://services.arcgisonline.com/ArcGIS/rest/services/World_Topo_Map/MapServer",
            "visibility": true,
            "opacity": 1,
            "title": "World Topographic Map"
        }]
    })
}

#[must_use]
pub fn has_bad_basemap(model: &Value) -> bool {
    get_prop(model, PRIMARY_BASEMAP_PATH)
        .is_some_and(|primary| !primary.get("baseMapLayers").is_some_and(Value::is_array))
}

pub fn migrate_bad_basemap(model: &mut Value) {
    let Some(primary) = get_prop(model, PRIMARY_BASEMAP_PATH) else {
        return;
    };
    let replacement = if is_bare_layer(primary) {
        let title = primary
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Basemap")
            .to_string();
        json!({ "title": title, "baseMapLayers": [primary.clone()] })
    } else {
        default_basemap()
    };
    set_prop(model, PRIMARY_BASEMAP_PATH, replacement);
}

fn is_bare_layer(candidate: &Value) -> bool {
    candidate.get("url").is_some_and(Value::is_string)
        || candidate.get("layerType").is_some_and(Value::is_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_bad_basemap() {
        assert!(!has_bad_basemap(&json!({})));
        assert!(!has_bad_basemap(&json!({"data": {"map": {"basemaps": {
            "primary": {"baseMapLayers": []}
        }}}})));
        assert!(has_bad_basemap(&json!({"data": {"map": {"basemaps": {"primary": null}}}})));
        assert!(has_bad_basemap(&json!({"data": {"map": {"basemaps": {
            "primary": {"baseMapLayers": {}}
        }}}})));
    }

    #[test]
    fn test_bare_layer_wrapped() {
        let layer = json!({"url": "https://tiles/MapServer", "title": "Streets"});
        let mut model = json!({"data": {"map": {"basemaps": {"primary": layer.clone()}}}});
        migrate_bad_basemap(&mut model);
        assert_eq!(
            model["data"]["map"]["basemaps"]["primary"],
            json!({"title": "Streets", "baseMapLayers": [layer]})
        );
        assert!(!has_bad_basemap(&model));
    }

    #[test]
    fn test_garbage_replaced_with_default() {
        let mut model = json!({"data": {"map": {"basemaps": {"primary": "oops", "other": 1}}}});
        migrate_bad_basemap(&mut model);
        assert_eq!(model["data"]["map"]["basemaps"]["primary"], default_basemap());
        assert_eq!(model["data"]["map"]["basemaps"]["other"], 1);
    }
}
