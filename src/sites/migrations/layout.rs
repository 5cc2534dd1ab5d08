//! Repairs layouts whose sections were saved as an index-keyed object.

use serde_json::{Map, Value};

use crate::path::{get_prop, get_prop_mut};

const SECTIONS_PATH: &str = "data.values.layout.sections";

#[must_use]
pub fn has_broken_layout(model: &Value) -> bool {
    match get_prop(model, SECTIONS_PATH) {
        Some(Value::Object(_)) => true,
        Some(Value::Array(sections)) => sections.iter().any(lacks_rows),
        _ => false,
    }
}

pub fn repair_layout_sections(model: &mut Value) {
    let Some(sections) = get_prop_mut(model, SECTIONS_PATH) else {
        return;
    };
    if let Value::Object(keyed) = sections {
        let ordered = sections_in_order(std::mem::take(keyed));
        *sections = Value::Array(ordered);
    }
    if let Value::Array(sections) = sections {
        for section in sections.iter_mut().filter(|s| lacks_rows(s)) {
            if let Value::Object(section) = section {
                section.insert("rows".to_string(), Value::Array(Vec::new()));
            }
        }
    }
}

fn lacks_rows(section: &Value) -> bool {
    section.is_object() && !section.get("rows").is_some_and(Value::is_array)
}

/// Numeric keys in numeric order, then any other keys in key order.
fn sections_in_order(keyed: Map<String, Value>) -> Vec<Value> {
    let (mut indexed, named): (Vec<_>, Vec<_>) = keyed
        .into_iter()
        .map(|(key, section)| (key.parse::<u64>().ok(), section))
        .partition(|(index, _)| index.is_some());
    indexed.sort_by_key(|(index, _)| *index);
    indexed
        .into_iter()
        .chain(named)
        .map(|(_, section)| section)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyed_sections_become_array() {
        let mut model = json!({"data": {"values": {"layout": {"sections": {
            "10": {"rows": [{"id": "c"}]},
            "2": {"rows": [{"id": "b"}]},
            "0": {"rows": [{"id": "a"}]}
        }}}}});
        assert!(has_broken_layout(&model));
        repair_layout_sections(&mut model);
        assert_eq!(
            model["data"]["values"]["layout"]["sections"],
            json!([
                {"rows": [{"id": "a"}]},
                {"rows": [{"id": "b"}]},
                {"rows": [{"id": "c"}]}
            ])
        );
        assert!(!has_broken_layout(&model));
    }

    #[test]
    fn test_named_sections_follow_numeric_ones() {
        let mut model = json!({"data": {"values": {"layout": {"sections": {
            "footer": {"rows": [{"id": "f"}]},
            "1": {"rows": [{"id": "b"}]},
            "banner": {"rows": [{"id": "x"}]},
            "0": {"rows": [{"id": "a"}]}
        }}}}});
        repair_layout_sections(&mut model);
        let ids: Vec<&str> = model["data"]["values"]["layout"]["sections"]
            .as_array()
            .map(|sections| {
                sections
                    .iter()
                    .filter_map(|s| s["rows"][0]["id"].as_str())
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(ids, vec!["a", "b", "x", "f"]);
    }

    #[test]
    fn test_missing_rows_filled() {
        let mut model = json!({"data": {"values": {"layout": {"sections": [
            {"style": {}},
            {"rows": null},
            {"rows": [{"cards": []}]}
        ]}}}});
        assert!(has_broken_layout(&model));
        repair_layout_sections(&mut model);
        assert_eq!(
            model["data"]["values"]["layout"]["sections"],
            json!([
                {"style": {}, "rows": []},
                {"rows": []},
                {"rows": [{"cards": []}]}
            ])
        );
    }

    #[test]
    fn test_healthy_layout_not_flagged() {
        assert!(!has_broken_layout(&json!({})));
        assert!(!has_broken_layout(&json!({"data": {"values": {"layout": {"sections": [
            {"rows": []}
        ]}}}})));
    }
}
