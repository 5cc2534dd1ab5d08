//! Hub Events: entity type, mapping table and mapper.

pub mod defaults;
pub mod mapper;
pub mod property_map;
pub mod types;

pub use defaults::default_event_record;
pub use mapper::EventPropertyMapper;
pub use property_map::{event_property_mapper, EVENT_PROPERTY_MAP};
pub use types::{
    EventAccess, EventAssociation, EventAttendanceType, EventStatus, HubEvent, HubEventAccess,
    HubEventAttendanceType, HubEventCapacityType, HubEventPermissions,
};
