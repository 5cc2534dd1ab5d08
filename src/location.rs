//! Location value object shared by Hub entities.
//!
//! Store records describe a location as `{type, spatialReference, extent,
//! geometries}` with loosely enforced contents. [`HubLocation::from_store`]
//! normalises that into a consistent shape; [`HubLocation::to_store`] writes
//! it back.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Bounding box as `[[xmin, ymin], [xmax, ymax]]`.
pub type Extent = [[f64; 2]; 2];

/// How an entity's location was chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// No location.
    #[default]
    None,
    /// The owning organization's extent.
    Org,
    /// Geometries drawn or searched by the user.
    Custom,
}

impl LocationType {
    /// Parses a store value, ignoring case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("none") {
            Some(Self::None)
        } else if raw.eq_ignore_ascii_case("org") {
            Some(Self::Org)
        } else if raw.eq_ignore_ascii_case("custom") {
            Some(Self::Custom)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Org => "org",
            Self::Custom => "custom",
        }
    }
}

/// Esri spatial reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_wkid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkt: Option<String>,
}

impl SpatialReference {
    /// Web Mercator, the default for Hub maps.
    #[must_use]
    pub const fn web_mercator() -> Self {
        Self {
            wkid: Some(102_100),
            latest_wkid: Some(3857),
            wkt: None,
        }
    }

    fn to_value(&self) -> Value {
        let mut out = Map::new();
        if let Some(wkid) = self.wkid {
            out.insert("wkid".to_string(), json!(wkid));
        }
        if let Some(latest) = self.latest_wkid {
            out.insert("latestWkid".to_string(), json!(latest));
        }
        if let Some(wkt) = &self.wkt {
            out.insert("wkt".to_string(), json!(wkt));
        }
        Value::Object(out)
    }
}

/// Normalised location of a Hub entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubLocation {
    #[serde(rename = "type", default)]
    pub kind: LocationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    /// Esri JSON geometries, kept untyped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometries: Vec<Value>,
}

impl HubLocation {
    /// Reads a store-side location.
    ///
    /// - `type` is case-folded; a missing or unknown type becomes `custom`
    ///   when geometries are present, `none` otherwise.
    /// - `extent` may be a coordinate pair list or an Esri envelope and is
    ///   reordered so min precedes max.
    /// - Geometries without a spatial reference inherit the location's.
    /// - A `custom` location with no extent gets one computed from its
    ///   geometries, and degrades to `none` if it has neither.
    #[must_use]
    pub fn from_store(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }

        let sr_value = value.get("spatialReference").filter(|sr| sr.is_object());
        let spatial_reference =
            sr_value.and_then(|sr| serde_json::from_value::<SpatialReference>(sr.clone()).ok());

        let geometries: Vec<Value> = value
            .get("geometries")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|geometry| geometry.is_object())
                    .map(|geometry| inherit_spatial_reference(geometry, sr_value))
                    .collect()
            })
            .unwrap_or_default();

        let mut extent = value.get("extent").and_then(normalize_extent);

        let mut kind = match value.get("type").and_then(Value::as_str).and_then(LocationType::parse) {
            Some(kind) => kind,
            None if !geometries.is_empty() => LocationType::Custom,
            None => LocationType::None,
        };

        if kind == LocationType::Custom {
            if extent.is_none() {
                extent = extent_from_geometries(&geometries);
            }
            if geometries.is_empty() && extent.is_none() {
                kind = LocationType::None;
            }
        }

        Self {
            kind,
            spatial_reference,
            extent,
            geometries,
        }
    }

    /// Writes this location in store shape.
    #[must_use]
    pub fn to_store(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), json!(self.kind.as_str()));
        if self.kind == LocationType::None {
            return Value::Object(out);
        }
        if let Some(sr) = &self.spatial_reference {
            out.insert("spatialReference".to_string(), sr.to_value());
        }
        if let Some([[xmin, ymin], [xmax, ymax]]) = self.extent {
            out.insert(
                "extent".to_string(),
                json!([[xmin, ymin], [xmax, ymax]]),
            );
        }
        if !self.geometries.is_empty() {
            out.insert("geometries".to_string(), Value::Array(self.geometries.clone()));
        }
        Value::Object(out)
    }
}

fn inherit_spatial_reference(geometry: &Value, sr: Option<&Value>) -> Value {
    let mut geometry = geometry.clone();
    if let (Some(sr), Value::Object(map)) = (sr, &mut geometry) {
        map.entry("spatialReference").or_insert_with(|| sr.clone());
    }
    geometry
}

/// Reads an extent from either `[[xmin, ymin], [xmax, ymax]]` or
/// `{xmin, ymin, xmax, ymax}`.
#[must_use]
pub fn normalize_extent(value: &Value) -> Option<Extent> {
    let (x1, y1, x2, y2) = match value {
        Value::Array(corners) if corners.len() == 2 => {
            let (x1, y1) = coordinate(&corners[0])?;
            let (x2, y2) = coordinate(&corners[1])?;
            (x1, y1, x2, y2)
        }
        Value::Object(map) => (
            map.get("xmin")?.as_f64()?,
            map.get("ymin")?.as_f64()?,
            map.get("xmax")?.as_f64()?,
            map.get("ymax")?.as_f64()?,
        ),
        _ => return None,
    };
    if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
        return None;
    }
    Some([[x1.min(x2), y1.min(y2)], [x1.max(x2), y1.max(y2)]])
}

/// Bounding box of every coordinate in a list of Esri JSON geometries.
#[must_use]
pub fn extent_from_geometries(geometries: &[Value]) -> Option<Extent> {
    let mut points = Vec::new();
    for geometry in geometries {
        collect_coordinates(geometry, &mut points);
    }
    let (first, rest) = points.split_first()?;
    let init = [[first.0, first.1], [first.0, first.1]];
    Some(rest.iter().fold(init, |[[xmin, ymin], [xmax, ymax]], &(x, y)| {
        [[xmin.min(x), ymin.min(y)], [xmax.max(x), ymax.max(y)]]
    }))
}

fn coordinate(value: &Value) -> Option<(f64, f64)> {
    let pair = value.as_array()?;
    let x = pair.first()?.as_f64()?;
    let y = pair.get(1)?.as_f64()?;
    Some((x, y))
}

fn collect_coordinates(geometry: &Value, out: &mut Vec<(f64, f64)>) {
    if let (Some(x), Some(y)) = (
        geometry.get("x").and_then(Value::as_f64),
        geometry.get("y").and_then(Value::as_f64),
    ) {
        out.push((x, y));
    }
    if let Some(points) = geometry.get("points").and_then(Value::as_array) {
        out.extend(points.iter().filter_map(coordinate));
    }
    for key in ["paths", "rings"] {
        if let Some(parts) = geometry.get(key).and_then(Value::as_array) {
            for part in parts.iter().filter_map(Value::as_array) {
                out.extend(part.iter().filter_map(coordinate));
            }
        }
    }
    if let Some([[xmin, ymin], [xmax, ymax]]) = normalize_extent(geometry) {
        out.push((xmin, ymin));
        out.push((xmax, ymax));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_object_is_none() {
        assert_eq!(HubLocation::from_store(&Value::Null), HubLocation::default());
        assert_eq!(HubLocation::from_store(&json!("custom")).kind, LocationType::None);
    }

    #[test]
    fn test_type_is_case_folded() {
        let location = HubLocation::from_store(&json!({"type": "ORG"}));
        assert_eq!(location.kind, LocationType::Org);
    }

    #[test]
    fn test_unknown_type_inferred_from_geometries() {
        let location = HubLocation::from_store(&json!({
            "type": "mystery",
            "geometries": [{"x": 1.0, "y": 2.0}]
        }));
        assert_eq!(location.kind, LocationType::Custom);

        let empty = HubLocation::from_store(&json!({"type": "mystery"}));
        assert_eq!(empty.kind, LocationType::None);
    }

    #[test]
    fn test_custom_without_anything_degrades_to_none() {
        let location = HubLocation::from_store(&json!({"type": "custom", "geometries": []}));
        assert_eq!(location.kind, LocationType::None);
    }

    #[test]
    fn test_extent_envelope_and_inverted_corners() {
        let from_envelope = normalize_extent(&json!({"xmin": 1, "ymin": 2, "xmax": 3, "ymax": 4}));
        assert_eq!(from_envelope, Some([[1.0, 2.0], [3.0, 4.0]]));

        let inverted = normalize_extent(&json!([[3, 4], [1, 2]]));
        assert_eq!(inverted, Some([[1.0, 2.0], [3.0, 4.0]]));

        assert!(normalize_extent(&json!([[1, 2]])).is_none());
        assert!(normalize_extent(&json!({"xmin": 1})).is_none());
    }

    #[test]
    fn test_extent_computed_from_geometries() {
        let location = HubLocation::from_store(&json!({
            "type": "custom",
            "geometries": [
                {"x": -10.0, "y": 5.0},
                {"rings": [[[0.0, 0.0], [4.0, 0.0], [4.0, 8.0], [0.0, 0.0]]]},
                {"paths": [[[2.0, -3.0], [3.0, 1.0]]]}
            ]
        }));
        assert_eq!(location.extent, Some([[-10.0, -3.0], [4.0, 8.0]]));
    }

    #[test]
    fn test_geometries_inherit_spatial_reference() {
        let location = HubLocation::from_store(&json!({
            "type": "custom",
            "spatialReference": {"wkid": 4326},
            "geometries": [
                {"x": 1.0, "y": 2.0},
                {"x": 3.0, "y": 4.0, "spatialReference": {"wkid": 102100}},
                "not a geometry"
            ]
        }));
        assert_eq!(location.geometries.len(), 2);
        assert_eq!(location.geometries[0]["spatialReference"], json!({"wkid": 4326}));
        assert_eq!(location.geometries[1]["spatialReference"], json!({"wkid": 102100}));
        assert_eq!(
            location.spatial_reference,
            Some(SpatialReference {
                wkid: Some(4326),
                ..SpatialReference::default()
            })
        );
    }

    #[test]
    fn test_to_store_none_is_bare() {
        let location = HubLocation {
            kind: LocationType::None,
            extent: Some([[0.0, 0.0], [1.0, 1.0]]),
            ..HubLocation::default()
        };
        assert_eq!(location.to_store(), json!({"type": "none"}));
    }

    #[test]
    fn test_to_store_custom() {
        let location = HubLocation {
            kind: LocationType::Custom,
            spatial_reference: Some(SpatialReference::web_mercator()),
            extent: Some([[0.0, 0.0], [1.0, 1.0]]),
            geometries: vec![json!({"x": 0.5, "y": 0.5})],
        };
        assert_eq!(
            location.to_store(),
            json!({
                "type": "custom",
                "spatialReference": {"wkid": 102100, "latestWkid": 3857},
                "extent": [[0.0, 0.0], [1.0, 1.0]],
                "geometries": [{"x": 0.5, "y": 0.5}]
            })
        );
    }

    #[test]
    fn test_store_round_trip() {
        let store = json!({
            "type": "custom",
            "spatialReference": {"wkid": 4326},
            "extent": [[-1.0, -1.0], [1.0, 1.0]],
            "geometries": [{"x": 0.0, "y": 0.0, "spatialReference": {"wkid": 4326}}]
        });
        assert_eq!(HubLocation::from_store(&store).to_store(), store);
    }
}
