//! Declarative `(entity path, store path)` table for events.
//!
//! Only one-to-one copies live here. Access, attendance, capacities, online
//! meetings, status, timestamps, associations and location need translation
//! and are handled by [`EventPropertyMapper`](super::EventPropertyMapper).

use crate::mapper::{PropertyMap, PropertyMapper};

/// Entity path first, store path second.
pub const EVENT_PROPERTY_MAP: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "title"),
    ("summary", "summary"),
    ("description", "description"),
    ("orgId", "orgId"),
    ("owner", "creator.username"),
    ("tags", "tags"),
    ("categories", "categories"),
    ("timeZone", "timeZone"),
    ("isAllDay", "allDay"),
    ("allowRegistration", "allowRegistration"),
    ("notifyAttendees", "notifyAttendees"),
    ("readGroupIds", "readGroups"),
    ("editGroupIds", "editGroups"),
    ("permissions.canEdit", "permission.canEdit"),
    ("permissions.canDelete", "permission.canDelete"),
    ("permissions.canSetAccessToOrg", "permission.canSetAccessToOrg"),
    ("permissions.canSetAccessToPrivate", "permission.canSetAccessToPrivate"),
    ("permissions.canSetAccessToPublic", "permission.canSetAccessToPublic"),
    ("permissions.canSetStatusToCancelled", "permission.canSetStatusToCancelled"),
    ("permissions.canSetStatusToRemoved", "permission.canSetStatusToRemoved"),
];

/// Builds the generic mapper over [`EVENT_PROPERTY_MAP`].
#[must_use]
pub fn event_property_mapper() -> PropertyMapper {
    PropertyMapper::new(
        EVENT_PROPERTY_MAP
            .iter()
            .map(|(entity_key, store_key)| PropertyMap::new(entity_key, store_key))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entity_keys_are_unique() {
        let keys: HashSet<_> = EVENT_PROPERTY_MAP.iter().map(|(entity, _)| *entity).collect();
        assert_eq!(keys.len(), EVENT_PROPERTY_MAP.len());
    }

    #[test]
    fn test_mapper_covers_table() {
        assert_eq!(event_property_mapper().mappings().len(), EVENT_PROPERTY_MAP.len());
    }
}
