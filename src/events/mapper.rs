//! Event-specific property mapper.
//!
//! Runs the generic table copy and then fills in the fields that need
//! translation between the Events API record and [`HubEvent`].

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::MappingError;
use crate::location::HubLocation;
use crate::mapper::PropertyMapper;
use crate::path::set_prop;
use crate::time::{format_timestamp, parse_timestamp};

use super::property_map::event_property_mapper;
use super::types::{
    EventAccess, EventAssociation, EventAttendanceType, EventStatus, HubEvent, HubEventAccess,
    HubEventAttendanceType, HubEventCapacityType,
};

const ENTITY: &str = "HubEvent";

/// Maps Events API records to [`HubEvent`] and back.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use hub_domain::events::{EventPropertyMapper, HubEvent, HubEventAccess};
/// use serde_json::json;
///
/// let mapper = EventPropertyMapper::new();
/// let store = json!({"title": "Meetup", "access": "PRIVATE", "readGroups": ["g1"]});
/// let event = mapper.store_to_entity(&store, &HubEvent::default())?;
/// assert_eq!(event.name, "Meetup");
/// assert_eq!(event.access, HubEventAccess::Shared);
/// # Ok::<(), hub_domain::error::MappingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EventPropertyMapper {
    mapper: PropertyMapper,
}

impl Default for EventPropertyMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPropertyMapper {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mapper: event_property_mapper(),
        }
    }

    /// Builds an entity from a store record, computing `isPast` against the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Conversion` if the mapped tree does not fit
    /// the [`HubEvent`] shape (for example a string where a list belongs).
    pub fn store_to_entity(&self, store: &Value, seed: &HubEvent) -> Result<HubEvent, MappingError> {
        self.store_to_entity_at(store, seed, Utc::now())
    }

    /// Builds an entity from a store record as of `now`.
    ///
    /// # Errors
    ///
    /// See [`EventPropertyMapper::store_to_entity`].
    pub fn store_to_entity_at(
        &self,
        store: &Value,
        seed: &HubEvent,
        now: DateTime<Utc>,
    ) -> Result<HubEvent, MappingError> {
        let seed_value =
            serde_json::to_value(seed).map_err(|e| MappingError::conversion(ENTITY, &e))?;
        let mapped = self.mapper.store_to_entity(store, &seed_value);
        let mut event: HubEvent =
            serde_json::from_value(mapped).map_err(|e| MappingError::conversion(ENTITY, &e))?;

        read_access(store, &mut event);
        read_attendance(store, &mut event);
        read_capacities(store, &mut event);
        read_status(store, &mut event);
        read_timestamps(store, &mut event);
        event.is_past = event.end_date_time.is_some_and(|end| end < now);
        read_associations(store, &mut event);
        derive_permissions(&mut event);
        if let Some(location) = store.get("location").filter(|l| !l.is_null()) {
            event.location = Some(HubLocation::from_store(location));
        }

        Ok(event)
    }

    /// Writes an entity onto a clone of `seed`, producing the record to
    /// send to the Events API.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Conversion` if the entity cannot be
    /// serialised.
    pub fn entity_to_store(&self, entity: &HubEvent, seed: &Value) -> Result<Value, MappingError> {
        let entity_value =
            serde_json::to_value(entity).map_err(|e| MappingError::conversion(ENTITY, &e))?;
        let mut store = self.mapper.entity_to_store(&entity_value, seed);

        set_prop(&mut store, "access", json!(EventAccess::from(entity.access).as_str()));
        set_prop(&mut store, "attendanceType", attendance_flags(entity.attendance_type));
        set_prop(
            &mut store,
            "inPersonCapacity",
            capacity_value(entity.in_person_capacity_type, entity.in_person_capacity),
        );
        set_prop(&mut store, "onlineMeetings", online_meetings(entity));
        set_prop(&mut store, "status", json!(entity.status().as_str()));

        for (key, at) in [
            ("createdAt", entity.created_date),
            ("updatedAt", entity.updated_date),
            ("startDateTime", entity.start_date_time),
            ("endDateTime", entity.end_date_time),
        ] {
            if let Some(at) = at {
                set_prop(&mut store, key, json!(format_timestamp(at)));
            }
        }

        let associations = serde_json::to_value(&entity.referenced_content_ids_by_type)
            .map_err(|e| MappingError::conversion(ENTITY, &e))?;
        set_prop(&mut store, "associations", associations);

        if let Some(location) = &entity.location {
            set_prop(&mut store, "location", location.to_store());
        }

        Ok(store)
    }
}

fn read_access(store: &Value, event: &mut HubEvent) {
    let Some(raw) = store.get("access").and_then(Value::as_str) else {
        return;
    };
    let Some(access) = EventAccess::parse(raw) else {
        warn!(access = raw, "ignoring unknown event access");
        return;
    };
    event.access = match access {
        EventAccess::Private if has_groups(store, "readGroups") || has_groups(store, "editGroups") => {
            HubEventAccess::Shared
        }
        EventAccess::Private => HubEventAccess::Private,
        EventAccess::Org => HubEventAccess::Org,
        EventAccess::Public => HubEventAccess::Public,
    };
}

fn has_groups(store: &Value, key: &str) -> bool {
    store
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|groups| !groups.is_empty())
}

fn read_attendance(store: &Value, event: &mut HubEvent) {
    let flags: Vec<EventAttendanceType> = match store.get("attendanceType") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(EventAttendanceType::parse)
            .collect(),
        Some(Value::String(single)) => EventAttendanceType::parse(single).into_iter().collect(),
        _ => return,
    };
    let in_person = flags.contains(&EventAttendanceType::InPerson);
    let online = flags.contains(&EventAttendanceType::Virtual);
    event.attendance_type = match (in_person, online) {
        (true, true) => HubEventAttendanceType::Both,
        (false, true) => HubEventAttendanceType::Online,
        _ => HubEventAttendanceType::InPerson,
    };
}

fn attendance_flags(attendance: HubEventAttendanceType) -> Value {
    let mut flags = Vec::with_capacity(2);
    if attendance.includes_in_person() {
        flags.push(EventAttendanceType::InPerson.as_str());
    }
    if attendance.includes_online() {
        flags.push(EventAttendanceType::Virtual.as_str());
    }
    json!(flags)
}

/// `null` means unlimited; a non-negative whole number is a fixed capacity.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn read_capacity(value: &Value) -> Option<(HubEventCapacityType, Option<u64>)> {
    if value.is_null() {
        return Some((HubEventCapacityType::Unlimited, None));
    }
    let capacity = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })?;
    Some((HubEventCapacityType::Fixed, Some(capacity)))
}

fn capacity_value(kind: HubEventCapacityType, capacity: Option<u64>) -> Value {
    match (kind, capacity) {
        (HubEventCapacityType::Fixed, Some(capacity)) => json!(capacity),
        _ => Value::Null,
    }
}

fn read_capacities(store: &Value, event: &mut HubEvent) {
    if let Some(raw) = store.get("inPersonCapacity") {
        match read_capacity(raw) {
            Some((kind, capacity)) => {
                event.in_person_capacity_type = kind;
                event.in_person_capacity = capacity;
            }
            None => warn!(capacity = %raw, "ignoring invalid in-person capacity"),
        }
    }

    let Some(meeting) = store.get("onlineMeetings").and_then(|m| m.get(0)) else {
        return;
    };
    if let Some(url) = meeting.get("url").and_then(Value::as_str) {
        event.online_url = Some(url.to_string());
    }
    if let Some(details) = meeting.get("details").and_then(Value::as_str) {
        event.online_details = Some(details.to_string());
    }
    if let Some(raw) = meeting.get("capacity") {
        match read_capacity(raw) {
            Some((kind, capacity)) => {
                event.online_capacity_type = kind;
                event.online_capacity = capacity;
            }
            None => warn!(capacity = %raw, "ignoring invalid online capacity"),
        }
    }
}

fn online_meetings(entity: &HubEvent) -> Value {
    if !entity.attendance_type.includes_online() {
        return json!([]);
    }
    let mut meeting = Map::new();
    meeting.insert("url".to_string(), json!(entity.online_url));
    meeting.insert("details".to_string(), json!(entity.online_details));
    meeting.insert(
        "capacity".to_string(),
        capacity_value(entity.online_capacity_type, entity.online_capacity),
    );
    Value::Array(vec![Value::Object(meeting)])
}

fn read_status(store: &Value, event: &mut HubEvent) {
    let Some(raw) = store.get("status").and_then(Value::as_str) else {
        return;
    };
    let Some(status) = EventStatus::parse(raw) else {
        warn!(status = raw, "ignoring unknown event status");
        return;
    };
    event.is_planned = status == EventStatus::Planned;
    event.is_canceled = status == EventStatus::Canceled;
    event.is_removed = status == EventStatus::Removed;
}

fn read_timestamps(store: &Value, event: &mut HubEvent) {
    let fields = [
        ("createdAt", &mut event.created_date),
        ("updatedAt", &mut event.updated_date),
        ("startDateTime", &mut event.start_date_time),
        ("endDateTime", &mut event.end_date_time),
    ];
    for (key, slot) in fields {
        match store.get(key) {
            None | Some(Value::Null) => {}
            Some(Value::String(raw)) => match parse_timestamp(raw) {
                Some(at) => *slot = Some(at),
                None => warn!(field = key, value = raw.as_str(), "dropping unparseable timestamp"),
            },
            Some(other) => warn!(field = key, value = %other, "dropping non-string timestamp"),
        }
    }
}

fn read_associations(store: &Value, event: &mut HubEvent) {
    let Some(items) = store.get("associations").and_then(Value::as_array) else {
        return;
    };
    let associations: Vec<EventAssociation> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    event.referenced_content_ids = associations.iter().map(|a| a.entity_id.clone()).collect();
    event.referenced_content_ids_by_type = associations;
}

fn derive_permissions(event: &mut HubEvent) {
    let p = &mut event.permissions;
    p.can_change_access =
        p.can_set_access_to_org && p.can_set_access_to_private && p.can_set_access_to_public;
    p.can_change_status_canceled = p.can_set_status_to_cancelled;
    p.can_change_status_removed = p.can_set_status_to_removed;
    p.can_change_status = p.can_change_status_canceled || p.can_change_status_removed;
}
