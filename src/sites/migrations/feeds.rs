//! Schema 1.5: the DCAT feed template moves to `data.feeds.dcatUS11`.
//!
//! Legacy templates were written against item fields (`{{title}}`,
//! `{{snippet}}`); the feed service now renders content entities, so the
//! placeholders are renamed on the way.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::warn;

use crate::path::{delete_prop, set_prop};

const LEGACY_FEED_PATH: &str = "data.values.dcatConfig";
const FEED_PATH: &str = "data.feeds.dcatUS11";

/// Legacy placeholder and its replacement.
pub const TOKEN_RENAMES: &[(&str, &str)] = &[
    ("title", "name"),
    ("snippet", "summary"),
    ("created", "created:toISO"),
    ("modified", "modified:toISO"),
    ("landingPage", "url"),
];

static TOKEN_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn token_regex() -> Option<&'static Regex> {
    TOKEN_REGEX
        .get_or_init(|| match Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}") {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(error = %e, "feed token pattern failed to compile");
                None
            }
        })
        .as_ref()
}

pub fn migrate_feed_config(model: &mut Value) {
    let Some(legacy) = delete_prop(model, LEGACY_FEED_PATH) else {
        return;
    };
    let mut config = match legacy {
        Value::String(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
        other => other,
    };
    rewrite_tokens(&mut config);
    set_prop(model, FEED_PATH, config);
}

/// Renames legacy placeholders in every string leaf of `value`.
pub fn rewrite_tokens(value: &mut Value) {
    match value {
        Value::String(text) => {
            if let Some(rewritten) = rewrite_template(text) {
                *text = rewritten;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(rewrite_tokens),
        Value::Object(map) => map.values_mut().for_each(rewrite_tokens),
        _ => {}
    }
}

/// Returns the rewritten template, or `None` when nothing changed.
fn rewrite_template(template: &str) -> Option<String> {
    let regex = token_regex()?;
    if !regex.is_match(template) {
        return None;
    }
    let rewritten = regex.replace_all(template, |caps: &Captures<'_>| {
        let token = &caps[1];
        match TOKEN_RENAMES.iter().find(|(legacy, _)| *legacy == token) {
            Some((_, renamed)) => format!("{{{{{renamed}}}}}"),
            None => caps[0].to_string(),
        }
    });
    Some(rewritten.into_owned())
}
