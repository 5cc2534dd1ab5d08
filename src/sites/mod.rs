//! Site models and their schema upgrades.
//!
//! A site model is persisted JSON with an `item` envelope and a `data`
//! region. [`upgrade_site_schema`] moves any stored model to the current
//! shape.

pub mod migrations;
pub mod schema;
pub mod upgrade;
pub mod where_clause;

pub use migrations::capabilities::convert_features_to_legacy_capabilities;
pub use schema::{
    schema_version, FixUp, Migration, SchemaVersion, VersionedMigration, SCHEMA_VERSION_PATH,
};
pub use upgrade::{
    site_fix_ups, site_migrations, upgrade_site_schema, APPLY_SITE_SCHEMA,
    ENFORCE_LOWERCASE_DOMAINS, ENSURE_CATALOG, ENSURE_TELEMETRY, MIGRATE_BAD_BASEMAP,
    MIGRATE_EVENT_LIST_CARD_CONFIGS, MIGRATE_FEED_CONFIG, MIGRATE_LEGACY_CAPABILITIES_TO_FEATURES,
    PURGE_NON_GUIDS_FROM_CATALOG, REPAIR_LAYOUT_SECTIONS, SITE_SCHEMA_VERSION,
};
pub use where_clause::{parse_where_clause, ComparisonOperator, ExpressionValue, WhereExpression};
