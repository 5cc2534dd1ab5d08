//! Event entity and store-side enums.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::HubLocation;

/// Who can see an event, as exposed to application code.
///
/// `Shared` is not a store value: it describes a private event that has
/// been shared with at least one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HubEventAccess {
    #[default]
    Private,
    Org,
    Public,
    Shared,
}

/// How attendees take part in an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HubEventAttendanceType {
    #[default]
    InPerson,
    Online,
    Both,
}

impl HubEventAttendanceType {
    #[must_use]
    pub const fn includes_in_person(self) -> bool {
        matches!(self, Self::InPerson | Self::Both)
    }

    #[must_use]
    pub const fn includes_online(self) -> bool {
        matches!(self, Self::Online | Self::Both)
    }
}

/// Whether a capacity is a fixed number or unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HubEventCapacityType {
    Fixed,
    #[default]
    Unlimited,
}

/// Store-side access level (`access`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventAccess {
    Private,
    Org,
    Public,
}

impl EventAccess {
    /// Parses a store value, ignoring case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("private") {
            Some(Self::Private)
        } else if raw.eq_ignore_ascii_case("org") {
            Some(Self::Org)
        } else if raw.eq_ignore_ascii_case("public") {
            Some(Self::Public)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Org => "ORG",
            Self::Public => "PUBLIC",
        }
    }
}

impl From<HubEventAccess> for EventAccess {
    fn from(access: HubEventAccess) -> Self {
        match access {
            HubEventAccess::Private | HubEventAccess::Shared => Self::Private,
            HubEventAccess::Org => Self::Org,
            HubEventAccess::Public => Self::Public,
        }
    }
}

/// Store-side event status (`status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Planned,
    Canceled,
    Removed,
}

impl EventStatus {
    /// Parses a store value, ignoring case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("planned") {
            Some(Self::Planned)
        } else if raw.eq_ignore_ascii_case("canceled") {
            Some(Self::Canceled)
        } else if raw.eq_ignore_ascii_case("removed") {
            Some(Self::Removed)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::Canceled => "CANCELED",
            Self::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-side attendance flag (one entry of `attendanceType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventAttendanceType {
    InPerson,
    Virtual,
}

impl EventAttendanceType {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("in_person") {
            Some(Self::InPerson)
        } else if raw.eq_ignore_ascii_case("virtual") {
            Some(Self::Virtual)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InPerson => "IN_PERSON",
            Self::Virtual => "VIRTUAL",
        }
    }
}

/// A link from an event to another Hub entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAssociation {
    pub entity_id: String,
    pub entity_type: String,
}

/// Capabilities the current user holds on an event.
///
/// The `can_set_*` flags are copied from the store; the `can_change_*`
/// flags are derived from them when reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HubEventPermissions {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_set_access_to_org: bool,
    pub can_set_access_to_private: bool,
    pub can_set_access_to_public: bool,
    pub can_set_status_to_cancelled: bool,
    pub can_set_status_to_removed: bool,
    /// All three access flags are set.
    pub can_change_access: bool,
    /// Any status flag is set.
    pub can_change_status: bool,
    pub can_change_status_canceled: bool,
    pub can_change_status_removed: bool,
}

/// An event as seen by application code.
///
/// Field names serialise in camelCase; those names are the entity-side
/// paths of the event property map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HubEvent {
    pub id: Option<String>,
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub org_id: Option<String>,
    pub owner: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub time_zone: Option<String>,
    pub is_all_day: bool,
    pub allow_registration: bool,
    pub notify_attendees: bool,

    pub access: HubEventAccess,
    pub read_group_ids: Vec<String>,
    pub edit_group_ids: Vec<String>,

    pub attendance_type: HubEventAttendanceType,
    pub in_person_capacity: Option<u64>,
    pub in_person_capacity_type: HubEventCapacityType,
    pub online_capacity: Option<u64>,
    pub online_capacity_type: HubEventCapacityType,
    pub online_url: Option<String>,
    pub online_details: Option<String>,

    pub is_canceled: bool,
    pub is_planned: bool,
    pub is_removed: bool,
    /// Computed when reading; never written back.
    pub is_past: bool,

    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,

    pub location: Option<HubLocation>,
    pub permissions: HubEventPermissions,

    pub referenced_content_ids: Vec<String>,
    pub referenced_content_ids_by_type: Vec<EventAssociation>,
}

impl Default for HubEvent {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            summary: None,
            description: None,
            org_id: None,
            owner: None,
            tags: Vec::new(),
            categories: Vec::new(),
            time_zone: None,
            is_all_day: false,
            allow_registration: true,
            notify_attendees: true,
            access: HubEventAccess::Private,
            read_group_ids: Vec::new(),
            edit_group_ids: Vec::new(),
            attendance_type: HubEventAttendanceType::InPerson,
            in_person_capacity: None,
            in_person_capacity_type: HubEventCapacityType::Unlimited,
            online_capacity: None,
            online_capacity_type: HubEventCapacityType::Unlimited,
            online_url: None,
            online_details: None,
            is_canceled: false,
            is_planned: true,
            is_removed: false,
            is_past: false,
            start_date_time: None,
            end_date_time: None,
            created_date: None,
            updated_date: None,
            location: None,
            permissions: HubEventPermissions::default(),
            referenced_content_ids: Vec::new(),
            referenced_content_ids_by_type: Vec::new(),
        }
    }
}

impl HubEvent {
    /// Store status implied by the status flags.
    ///
    /// Removed takes precedence over canceled; anything else is planned.
    #[must_use]
    pub const fn status(&self) -> EventStatus {
        if self.is_removed {
            EventStatus::Removed
        } else if self.is_canceled {
            EventStatus::Canceled
        } else {
            EventStatus::Planned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_precedence() {
        let mut event = HubEvent {
            is_canceled: true,
            is_removed: true,
            ..HubEvent::default()
        };
        assert_eq!(event.status(), EventStatus::Removed);

        event.is_removed = false;
        assert_eq!(event.status(), EventStatus::Canceled);

        event.is_canceled = false;
        event.is_planned = false;
        assert_eq!(event.status(), EventStatus::Planned);
    }

    #[test]
    fn test_store_enum_parsing_ignores_case() {
        assert_eq!(EventAccess::parse("private"), Some(EventAccess::Private));
        assert_eq!(EventAccess::parse("PUBLIC"), Some(EventAccess::Public));
        assert_eq!(EventAccess::parse("shared"), None);
        assert_eq!(EventStatus::parse("Canceled"), Some(EventStatus::Canceled));
        assert_eq!(
            EventAttendanceType::parse("in_person"),
            Some(EventAttendanceType::InPerson)
        );
    }

    #[test]
    fn test_shared_access_is_private_in_store() {
        assert_eq!(EventAccess::from(HubEventAccess::Shared), EventAccess::Private);
        assert_eq!(EventAccess::from(HubEventAccess::Org).as_str(), "ORG");
    }

    #[test]
    fn test_entity_serializes_camel_case() {
        let value = serde_json::to_value(HubEvent::default()).unwrap();
        assert_eq!(value["attendanceType"], "inPerson");
        assert_eq!(value["inPersonCapacityType"], "unlimited");
        assert_eq!(value["access"], "private");
        assert!(value["permissions"]["canChangeAccess"].is_boolean());
    }
}
