//! The site upgrade chain.
//!
//! Steps are append-only: documents already stamped by a step must never
//! see it change, so new work goes at the end with a higher version.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use super::migrations::{
    basemap, capabilities, catalog, domains, event_list_card, feeds, layout, site_schema,
    telemetry,
};
use super::schema::{run_step, schema_version, FixUp, SchemaVersion, VersionedMigration};

/// Version every site leaves [`upgrade_site_schema`] with.
pub const SITE_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1.7);

pub const APPLY_SITE_SCHEMA: VersionedMigration =
    VersionedMigration::new("apply_site_schema", 1.0, site_schema::apply_site_schema);
pub const ENFORCE_LOWERCASE_DOMAINS: VersionedMigration =
    VersionedMigration::new("enforce_lowercase_domains", 1.1, domains::enforce_lowercase_domains);
pub const ENSURE_CATALOG: VersionedMigration =
    VersionedMigration::new("ensure_catalog", 1.2, catalog::ensure_catalog);
pub const PURGE_NON_GUIDS_FROM_CATALOG: VersionedMigration = VersionedMigration::new(
    "purge_non_guids_from_catalog",
    1.3,
    catalog::purge_non_guids_from_catalog,
);
pub const ENSURE_TELEMETRY: VersionedMigration =
    VersionedMigration::new("ensure_telemetry", 1.4, telemetry::ensure_telemetry);
pub const MIGRATE_FEED_CONFIG: VersionedMigration =
    VersionedMigration::new("migrate_feed_config", 1.5, feeds::migrate_feed_config);
pub const MIGRATE_EVENT_LIST_CARD_CONFIGS: VersionedMigration = VersionedMigration::new(
    "migrate_event_list_card_configs",
    1.6,
    event_list_card::migrate_event_list_card_configs,
);
pub const MIGRATE_LEGACY_CAPABILITIES_TO_FEATURES: VersionedMigration = VersionedMigration::new(
    "migrate_legacy_capabilities_to_features",
    1.7,
    capabilities::migrate_legacy_capabilities_to_features,
);

pub const MIGRATE_BAD_BASEMAP: FixUp = FixUp::new(
    "migrate_bad_basemap",
    basemap::has_bad_basemap,
    basemap::migrate_bad_basemap,
);
pub const REPAIR_LAYOUT_SECTIONS: FixUp = FixUp::new(
    "repair_layout_sections",
    layout::has_broken_layout,
    layout::repair_layout_sections,
);

static SITE_MIGRATIONS: [VersionedMigration; 8] = [
    APPLY_SITE_SCHEMA,
    ENFORCE_LOWERCASE_DOMAINS,
    ENSURE_CATALOG,
    PURGE_NON_GUIDS_FROM_CATALOG,
    ENSURE_TELEMETRY,
    MIGRATE_FEED_CONFIG,
    MIGRATE_EVENT_LIST_CARD_CONFIGS,
    MIGRATE_LEGACY_CAPABILITIES_TO_FEATURES,
];

static SITE_FIX_UPS: [FixUp; 2] = [MIGRATE_BAD_BASEMAP, REPAIR_LAYOUT_SECTIONS];

/// The versioned steps, oldest first.
#[must_use]
pub fn site_migrations() -> &'static [VersionedMigration] {
    &SITE_MIGRATIONS
}

/// Repairs run on every load.
#[must_use]
pub fn site_fix_ups() -> &'static [FixUp] {
    &SITE_FIX_UPS
}

/// Brings a site model up to [`SITE_SCHEMA_VERSION`].
///
/// The input is never modified. When the model is current and no fix-up
/// applies, the same reference comes back.
///
/// # Examples
///
/// ```
/// use hub_domain::sites::{upgrade_site_schema, SchemaVersion, SITE_SCHEMA_VERSION};
/// use serde_json::json;
///
/// let site = json!({"item": {"properties": {}}, "data": {"values": {"subdomain": "ABC"}}});
/// let upgraded = upgrade_site_schema(&site);
/// assert_eq!(SchemaVersion::of(&upgraded), SITE_SCHEMA_VERSION);
/// assert_eq!(upgraded["data"]["values"]["subdomain"], "abc");
/// ```
#[must_use]
pub fn upgrade_site_schema(model: &Value) -> Cow<'_, Value> {
    let from = schema_version(model);
    let mut upgraded = Cow::Borrowed(model);
    if from != SITE_SCHEMA_VERSION {
        for step in &SITE_MIGRATIONS {
            upgraded = run_step(upgraded, step);
        }
        debug!(%from, to = %schema_version(&upgraded), "site schema upgraded");
    }
    for fix_up in &SITE_FIX_UPS {
        upgraded = run_step(upgraded, fix_up);
    }
    upgraded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::Migration;
    use serde_json::json;

    #[test]
    fn test_targets_strictly_increase_to_current() {
        let targets: Vec<f64> = site_migrations().iter().map(|m| m.target().as_f64()).collect();
        assert!(targets.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(
            site_migrations().last().map(VersionedMigration::target),
            Some(SITE_SCHEMA_VERSION)
        );
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<&str> = site_migrations().iter().map(|m| m.name()).collect();
        names.extend(site_fix_ups().iter().map(|f| f.name()));
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_current_model_returned_as_is() {
        let site = json!({"item": {"properties": {"schemaVersion": 1.7}}, "data": {"values": {
            "subdomain": "STAYS"
        }}});
        let upgraded = upgrade_site_schema(&site);
        assert!(matches!(upgraded, Cow::Borrowed(_)));
        assert_eq!(upgraded["data"]["values"]["subdomain"], "STAYS");
    }

    #[test]
    fn test_fix_ups_run_on_current_model() {
        let site = json!({
            "item": {"properties": {"schemaVersion": 1.7}},
            "data": {"values": {"layout": {"sections": {"0": {"rows": []}}}}}
        });
        let upgraded = upgrade_site_schema(&site);
        assert!(matches!(upgraded, Cow::Owned(_)));
        assert_eq!(upgraded["data"]["values"]["layout"]["sections"], json!([{"rows": []}]));
        assert_eq!(SchemaVersion::of(&upgraded), SITE_SCHEMA_VERSION);
    }

    #[test]
    fn test_partial_upgrade_from_middle_of_chain() {
        let site = json!({
            "item": {"properties": {"schemaVersion": 1.5}},
            "data": {"values": {"subdomain": "UNTOUCHED", "capabilities": ["hideFollow"]}}
        });
        let upgraded = upgrade_site_schema(&site);
        // Steps at or below 1.5 do not run again.
        assert_eq!(upgraded["data"]["values"]["subdomain"], "UNTOUCHED");
        assert_eq!(upgraded["data"]["values"]["capabilities"], json!([]));
        assert_eq!(
            upgraded["data"]["settings"]["features"]["hub:site:feature:follow"],
            false
        );
        assert_eq!(SchemaVersion::of(&upgraded), SITE_SCHEMA_VERSION);
    }
}
