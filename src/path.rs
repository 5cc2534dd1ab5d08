//! Dotted property paths over JSON trees.
//!
//! Mapping tables and migrations address nested values with paths such as
//! `"permission.canEdit"` or `"data.values.layout.sections"`. Object keys are
//! matched literally and numeric segments index into arrays, so
//! `"onlineMeetings.0.url"` reads the url of the first meeting.
//!
//! Reads never panic: a missing key, an out of range index or a scalar in
//! the middle of the path yields `None`. Writes create intermediate objects
//! as they go and replace `null` or scalar intermediates with a fresh object.

use std::fmt;

use serde_json::{Map, Value};

/// A dotted property path, split into segments once at construction.
///
/// An empty path has no segments: reads return `None` and writes do nothing.
///
/// # Examples
///
/// ```
/// use hub_domain::path::PropertyPath;
/// use serde_json::json;
///
/// let path = PropertyPath::new("permission.canEdit");
/// let record = json!({"permission": {"canEdit": true}});
/// assert_eq!(path.get(&record), Some(&json!(true)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<String>,
}

impl PropertyPath {
    /// Splits `path` on `.` into segments.
    #[must_use]
    pub fn new(path: &str) -> Self {
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split('.').map(str::to_string).collect()
        };
        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// The path as originally written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Reads the value at this path.
    ///
    /// A terminal `null` is returned as `Some(&Value::Null)`; a `null`
    /// anywhere before the terminal segment yields `None`.
    #[must_use]
    pub fn get<'a>(&self, source: &'a Value) -> Option<&'a Value> {
        if self.segments.is_empty() {
            return None;
        }
        self.segments
            .iter()
            .try_fold(source, |current, segment| child(current, segment))
    }

    /// Reads the value at this path, treating `null` as absent.
    #[must_use]
    pub fn get_present<'a>(&self, source: &'a Value) -> Option<&'a Value> {
        self.get(source).filter(|value| !value.is_null())
    }

    /// Mutable access to the value at this path. Never creates anything.
    pub fn get_mut<'a>(&self, source: &'a mut Value) -> Option<&'a mut Value> {
        if self.segments.is_empty() {
            return None;
        }
        let mut current = source;
        for segment in &self.segments {
            current = child_mut(current, segment)?;
        }
        Some(current)
    }

    /// Writes `value` at this path, overwriting whatever is there.
    pub fn set(&self, target: &mut Value, value: Value) {
        self.write(target, value, false);
    }

    /// Writes `value` at this path, shallow-merging when both the existing
    /// value and `value` are objects.
    ///
    /// Arrays are never merged: an array on either side overwrites.
    pub fn deep_set(&self, target: &mut Value, value: Value) {
        self.write(target, value, true);
    }

    /// Removes and returns the value at this path.
    pub fn remove(&self, target: &mut Value) -> Option<Value> {
        let (last, parents) = self.segments.split_last()?;
        let mut current = target;
        for segment in parents {
            current = child_mut(current, segment)?;
        }
        match current {
            Value::Object(map) => map.remove(last),
            Value::Array(items) => {
                let index = last.parse::<usize>().ok()?;
                (index < items.len()).then(|| items.remove(index))
            }
            _ => None,
        }
    }

    fn write(&self, target: &mut Value, value: Value, merge: bool) {
        if self.segments.is_empty() {
            return;
        }
        let mut current = target;
        for segment in &self.segments {
            match step_or_insert(current, segment) {
                Some(next) => current = next,
                // An array segment that is not a valid index cannot be addressed.
                None => return,
            }
        }
        match value {
            Value::Object(incoming) if merge && current.is_object() => {
                if let Value::Object(existing) = current {
                    existing.extend(incoming);
                }
            }
            value => *current = value,
        }
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn child<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

fn child_mut<'a>(current: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match current {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

fn step_or_insert<'a>(current: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match current {
        Value::Object(map) => Some(map.entry(segment).or_insert(Value::Null)),
        Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?),
        other => {
            *other = Value::Object(Map::new());
            match other {
                Value::Object(map) => Some(map.entry(segment).or_insert(Value::Null)),
                _ => None,
            }
        }
    }
}

/// Reads the value at a dotted `path`. See [`PropertyPath::get`].
#[must_use]
pub fn get_prop<'a>(source: &'a Value, path: &str) -> Option<&'a Value> {
    PropertyPath::new(path).get(source)
}

/// Mutable access to the value at a dotted `path`.
pub fn get_prop_mut<'a>(source: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    PropertyPath::new(path).get_mut(source)
}

/// Writes `value` at a dotted `path`, merging objects. See
/// [`PropertyPath::deep_set`].
pub fn deep_set(target: &mut Value, path: &str, value: Value) {
    PropertyPath::new(path).deep_set(target, value);
}

/// Writes `value` at a dotted `path`, always overwriting.
pub fn set_prop(target: &mut Value, path: &str, value: Value) {
    PropertyPath::new(path).set(target, value);
}

/// Removes and returns the value at a dotted `path`.
pub fn delete_prop(target: &mut Value, path: &str) -> Option<Value> {
    PropertyPath::new(path).remove(target)
}
