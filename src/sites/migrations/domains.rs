//! Schema 1.1: hostnames are case-insensitive, store them lower-cased.

use serde_json::Value;

use crate::path::get_prop_mut;

/// Domain fields lower-cased by [`enforce_lowercase_domains`].
pub const DOMAIN_PATHS: [&str; 3] = [
    "data.values.subdomain",
    "data.values.defaultHostname",
    "data.values.customHostname",
];

pub fn enforce_lowercase_domains(model: &mut Value) {
    for path in DOMAIN_PATHS {
        if let Some(Value::String(domain)) = get_prop_mut(model, path) {
            *domain = domain.to_lowercase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lowercases_all_domain_fields() {
        let mut model = json!({"data": {"values": {
            "subdomain": "ABC",
            "defaultHostname": "ABC-Org.Hub.ArcGIS.com",
            "customHostname": "Data.City.GOV",
            "title": "Keep Me"
        }}});
        enforce_lowercase_domains(&mut model);
        assert_eq!(
            model,
            json!({"data": {"values": {
                "subdomain": "abc",
                "defaultHostname": "abc-org.hub.arcgis.com",
                "customHostname": "data.city.gov",
                "title": "Keep Me"
            }}})
        );
    }

    #[test]
    fn test_ignores_missing_and_non_string() {
        let mut model = json!({"data": {"values": {"subdomain": null, "customHostname": 3}}});
        let expected = model.clone();
        enforce_lowercase_domains(&mut model);
        assert_eq!(model, expected);
    }
}
