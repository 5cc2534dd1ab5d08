//! Schema 1.6: event list cards get structured settings.

use serde_json::{json, Map, Value};

use crate::path::get_prop_mut;
use crate::sites::where_clause::parse_where_clause;

/// Component name of the cards this migration rewrites.
pub const EVENT_LIST_CARD: &str = "event-list-card";

/// Rewrites every event list card's settings.
///
/// Sections saved as an index-keyed object are walked too; the layout
/// fix-up turns them into an array later, after this step has stamped 1.6.
pub fn migrate_event_list_card_configs(model: &mut Value) {
    let sections: Vec<&mut Value> = match get_prop_mut(model, "data.values.layout.sections") {
        Some(Value::Array(sections)) => sections.iter_mut().collect(),
        Some(Value::Object(keyed)) => keyed.values_mut().collect(),
        _ => return,
    };
    let cards = sections
        .into_iter()
        .filter_map(|section| section.get_mut("rows").and_then(Value::as_array_mut))
        .flatten()
        .filter_map(|row| row.get_mut("cards").and_then(Value::as_array_mut))
        .flatten();
    for card in cards {
        let Some(component) = card.get_mut("component").and_then(Value::as_object_mut) else {
            continue;
        };
        if component.get("name").and_then(Value::as_str) != Some(EVENT_LIST_CARD) {
            continue;
        }
        let legacy = match component.remove("settings") {
            Some(Value::Object(settings)) => settings,
            _ => Map::new(),
        };
        component.insert("settings".to_string(), event_list_settings(&legacy));
    }
}

/// Converts legacy event list card settings to the current shape.
#[must_use]
pub fn event_list_settings(legacy: &Map<String, Value>) -> Value {
    let string = |key: &str| legacy.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());
    let flag = |key: &str| legacy.get(key).and_then(Value::as_bool);

    let title_align = string("eventListTitleAlign")
        .or_else(|| string("titleAlign"))
        .unwrap_or("left");
    let expressions: Vec<Value> = string("where")
        .map(parse_where_clause)
        .unwrap_or_default()
        .iter()
        .map(|expression| expression.to_value())
        .collect();

    let mut settings = json!({
        "title": legacy.get("title").and_then(Value::as_str).unwrap_or(""),
        "showTitle": flag("showTitle").unwrap_or(true),
        "titleAlign": title_align,
        "view": {
            "default": string("defaultView").unwrap_or("list"),
            "calendarEnabled": flag("calendarEnabled").unwrap_or(false),
        },
        "selectionMode": string("selectionMode").unwrap_or("dynamic"),
        "filter": { "expressions": expressions },
    });
    if let Value::Object(settings) = &mut settings {
        if let Some(height) = legacy.get("height").filter(|h| !h.is_null()) {
            settings.insert("height".to_string(), height.clone());
        }
        if let Some(ids @ Value::Array(_)) = legacy.get("ids") {
            settings.insert("ids".to_string(), ids.clone());
        }
    }
    settings
}
