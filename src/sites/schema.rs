//! Schema versions and the migration contract.
//!
//! A site model carries its schema version at `item.properties.schemaVersion`.
//! Every [`VersionedMigration`] targets one version: it leaves a model at or
//! above that version alone and otherwise transforms a clone and stamps it
//! with exactly its target. A [`FixUp`] has no version; it detects a bad
//! shape directly.

use std::borrow::Cow;
use std::fmt;

use serde_json::{json, Value};
use tracing::debug;

use crate::path::{get_prop, set_prop};

/// Where a model records its schema version.
pub const SCHEMA_VERSION_PATH: &str = "item.properties.schemaVersion";

/// A site schema version such as `1.0` or `1.7`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SchemaVersion(f64);

impl SchemaVersion {
    /// Version of a model that has never been stamped.
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn new(version: f64) -> Self {
        Self(version)
    }

    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// Reads the version stamp of `model`; missing or unreadable stamps are
    /// version zero.
    #[must_use]
    pub fn of(model: &Value) -> Self {
        let version = match get_prop(model, SCHEMA_VERSION_PATH) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        version.filter(|v| v.is_finite()).map_or(Self::ZERO, Self)
    }

    /// Writes this version as the stamp of `model`.
    pub fn stamp(self, model: &mut Value) {
        set_prop(model, SCHEMA_VERSION_PATH, json!(self.0));
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Shorthand for [`SchemaVersion::of`].
#[must_use]
pub fn schema_version(model: &Value) -> SchemaVersion {
    SchemaVersion::of(model)
}

/// One step of a model upgrade.
pub trait Migration: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// True when the model needs nothing from this step.
    fn is_satisfied(&self, model: &Value) -> bool;

    /// Transforms `model` in place. Only called when not satisfied.
    fn migrate(&self, model: &mut Value);

    /// Applies this step without touching the input.
    ///
    /// Returns the input reference when satisfied, otherwise a migrated
    /// clone.
    fn apply<'a>(&self, model: &'a Value) -> Cow<'a, Value> {
        if self.is_satisfied(model) {
            return Cow::Borrowed(model);
        }
        let mut upgraded = model.clone();
        self.migrate(&mut upgraded);
        debug!(migration = self.name(), "applied site migration");
        Cow::Owned(upgraded)
    }
}

/// Runs `step` on a model that may already be an owned copy.
///
/// Owned models are migrated in place instead of being cloned again.
pub(crate) fn run_step<'a>(model: Cow<'a, Value>, step: &dyn Migration) -> Cow<'a, Value> {
    match model {
        Cow::Borrowed(model) => step.apply(model),
        Cow::Owned(mut model) => {
            if !step.is_satisfied(&model) {
                step.migrate(&mut model);
                debug!(migration = step.name(), "applied site migration");
            }
            Cow::Owned(model)
        }
    }
}

/// A migration gated by the model's schema version.
#[derive(Clone, Copy)]
pub struct VersionedMigration {
    name: &'static str,
    target: SchemaVersion,
    transform: fn(&mut Value),
}

impl VersionedMigration {
    #[must_use]
    pub const fn new(name: &'static str, target: f64, transform: fn(&mut Value)) -> Self {
        Self {
            name,
            target: SchemaVersion::new(target),
            transform,
        }
    }

    #[must_use]
    pub const fn target(&self) -> SchemaVersion {
        self.target
    }
}

impl Migration for VersionedMigration {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_satisfied(&self, model: &Value) -> bool {
        SchemaVersion::of(model) >= self.target
    }

    fn migrate(&self, model: &mut Value) {
        (self.transform)(model);
        self.target.stamp(model);
    }
}

impl fmt::Debug for VersionedMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionedMigration")
            .field("name", &self.name)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A versionless repair triggered by detecting a malformed shape.
#[derive(Clone, Copy)]
pub struct FixUp {
    name: &'static str,
    needs_repair: fn(&Value) -> bool,
    repair: fn(&mut Value),
}

impl FixUp {
    #[must_use]
    pub const fn new(name: &'static str, needs_repair: fn(&Value) -> bool, repair: fn(&mut Value)) -> Self {
        Self {
            name,
            needs_repair,
            repair,
        }
    }
}

impl fmt::Debug for FixUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixUp")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Migration for FixUp {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_satisfied(&self, model: &Value) -> bool {
        !(self.needs_repair)(model)
    }

    fn migrate(&self, model: &mut Value) {
        (self.repair)(model);
    }
}
