//! # hub-domain - Property mapping and schema upgrades for ArcGIS Hub
//!
//! Hub talks to several REST services whose record shapes differ from the
//! entities application code works with, and it persists site documents
//! whose shape has changed many times. This crate holds the two pieces that
//! bridge those gaps.
//!
//! ## Core Concepts
//!
//! - **Store record**: JSON as the backing service returns or accepts it
//! - **Entity**: the shape application code reads and writes
//! - **PropertyMapper**: a table of dotted paths copied between the two
//! - **Site model**: a persisted document carrying `item.properties.schemaVersion`
//! - **Migration**: one versioned step (or versionless repair) of a site upgrade
//!
//! ## Usage
//!
//! ```rust
//! use hub_domain::events::{default_event_record, EventPropertyMapper, HubEvent};
//! use hub_domain::sites::{upgrade_site_schema, SchemaVersion, SITE_SCHEMA_VERSION};
//! use serde_json::json;
//!
//! let mapper = EventPropertyMapper::new();
//! let event = mapper.store_to_entity(&default_event_record(), &HubEvent::default())?;
//! assert!(event.is_planned);
//!
//! let site = json!({"item": {"properties": {"schemaVersion": 1.0}}, "data": {"values": {}}});
//! let upgraded = upgrade_site_schema(&site);
//! assert_eq!(SchemaVersion::of(&upgraded), SITE_SCHEMA_VERSION);
//! # Ok::<(), hub_domain::HubError>(())
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core utilities
pub mod error;
pub mod path;
pub mod time;

// Mapping
pub mod events;
pub mod location;
pub mod mapper;

// Site documents
pub mod sites;

// Collaborator support
pub mod poll;
pub mod settings;

// Re-export primary types at crate root for convenience
pub use error::{HubError, HubResult, MappingError, PollError, SettingsError};
pub use events::{EventPropertyMapper, HubEvent};
pub use location::HubLocation;
pub use mapper::{PropertyMap, PropertyMapper};
pub use path::{deep_set, delete_prop, get_prop, set_prop, PropertyPath};
pub use poll::{poll, PollOptions};
pub use settings::HubSettings;
pub use sites::{upgrade_site_schema, SchemaVersion, SITE_SCHEMA_VERSION};
pub use time::{format_timestamp, parse_timestamp};
