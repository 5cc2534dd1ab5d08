//! Generic bidirectional property mapper.
//!
//! A [`PropertyMapper`] is configured once with a list of
//! `(entity path, store path)` pairs and then copies values between a store
//! record and an entity in either direction. Null or absent source values
//! are skipped, so whatever the seed already holds at the destination path
//! survives. Destination writes use [`PropertyPath::deep_set`], which merges
//! objects and replaces everything else.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::path::PropertyPath;

/// One entry of a mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMap {
    /// Path on the entity side.
    pub entity_key: PropertyPath,
    /// Path on the store side.
    pub store_key: PropertyPath,
}

impl PropertyMap {
    #[must_use]
    pub fn new(entity_key: &str, store_key: &str) -> Self {
        Self {
            entity_key: PropertyPath::new(entity_key),
            store_key: PropertyPath::new(store_key),
        }
    }
}

/// Projects values between store records and entities.
///
/// # Examples
///
/// ```
/// use hub_domain::mapper::PropertyMapper;
/// use serde_json::json;
///
/// let mapper = PropertyMapper::builder()
///     .map("name", "title")
///     .map("permissions.canEdit", "permission.canEdit")
///     .build();
///
/// let store = json!({"title": "Meetup", "permission": {"canEdit": true}});
/// let entity = mapper.store_to_entity(&store, &json!({}));
/// assert_eq!(entity, json!({"name": "Meetup", "permissions": {"canEdit": true}}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyMapper {
    mappings: Vec<PropertyMap>,
}

impl PropertyMapper {
    /// Creates a mapper over a fixed mapping table.
    ///
    /// Duplicate entity keys are logged; the later entry wins at runtime.
    #[must_use]
    pub fn new(mappings: Vec<PropertyMap>) -> Self {
        let mut seen = HashSet::new();
        for mapping in &mappings {
            if !seen.insert(mapping.entity_key.as_str()) {
                warn!(
                    entity_key = %mapping.entity_key,
                    "duplicate entity key in property map"
                );
            }
        }
        Self { mappings }
    }

    /// Starts a fluent mapping table.
    #[must_use]
    pub fn builder() -> PropertyMapperBuilder {
        PropertyMapperBuilder::default()
    }

    #[must_use]
    pub fn mappings(&self) -> &[PropertyMap] {
        &self.mappings
    }

    /// Copies store values onto a clone of `entity_seed`.
    #[must_use]
    pub fn store_to_entity(&self, store: &Value, entity_seed: &Value) -> Value {
        let mut entity = entity_seed.clone();
        for mapping in &self.mappings {
            if let Some(value) = mapping.store_key.get_present(store) {
                mapping.entity_key.deep_set(&mut entity, value.clone());
            }
        }
        entity
    }

    /// Copies entity values onto a clone of `store_seed`.
    #[must_use]
    pub fn entity_to_store(&self, entity: &Value, store_seed: &Value) -> Value {
        let mut store = store_seed.clone();
        for mapping in &self.mappings {
            if let Some(value) = mapping.entity_key.get_present(entity) {
                mapping.store_key.deep_set(&mut store, value.clone());
            }
        }
        store
    }
}

/// Builder for [`PropertyMapper`].
#[derive(Debug, Clone, Default)]
pub struct PropertyMapperBuilder {
    mappings: Vec<PropertyMap>,
}

impl PropertyMapperBuilder {
    /// Adds an `(entity path, store path)` pair.
    #[must_use]
    pub fn map(mut self, entity_key: &str, store_key: &str) -> Self {
        self.mappings.push(PropertyMap::new(entity_key, store_key));
        self
    }

    /// Adds a pair whose entity and store paths are identical.
    #[must_use]
    pub fn same(self, key: &str) -> Self {
        self.map(key, key)
    }

    #[must_use]
    pub fn build(self) -> PropertyMapper {
        PropertyMapper::new(self.mappings)
    }
}
