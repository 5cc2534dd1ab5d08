//! A narrow reader for the WHERE clauses legacy event list cards stored.
//!
//! Only the shapes those cards ever produced are understood: conjunctions of
//! `field >= value`, `field <= value` and `field = value`, where a value is a
//! quoted literal, a bare word or a `TIMESTAMP '...'` literal. Anything else
//! is dropped with a warning.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};
use tracing::warn;

use crate::time::{format_timestamp, parse_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    AtLeast,
    AtMost,
    Equals,
}

impl ComparisonOperator {
    /// Operators in the order clauses are tested against them.
    pub const ALL: [Self; 3] = [Self::AtLeast, Self::AtMost, Self::Equals];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
            Self::Equals => "=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionValue {
    /// A `TIMESTAMP '...'` literal, normalised to RFC 3339 when it parses.
    Date(String),
    Literal(String),
}

impl ExpressionValue {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Date(value) | Self::Literal(value) => value,
        }
    }

    #[must_use]
    pub const fn value_type(&self) -> &'static str {
        match self {
            Self::Date(_) => "date",
            Self::Literal(_) => "literal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereExpression {
    pub field: String,
    pub operator: ComparisonOperator,
    pub value: ExpressionValue,
}

impl WhereExpression {
    /// The stored filter expression shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "field": self.field,
            "operator": self.operator.as_str(),
            "value": self.value.as_str(),
            "valueType": self.value.value_type(),
        })
    }
}

static CONJUNCTION: OnceLock<Option<Regex>> = OnceLock::new();
static TIMESTAMP_LITERAL: OnceLock<Option<Regex>> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(pattern, error = %e, "where clause pattern failed to compile");
            None
        }
    })
    .as_ref()
}

/// Splits `clause` into expressions.
///
/// Never fails; clauses that cannot be read are skipped.
#[must_use]
pub fn parse_where_clause(clause: &str) -> Vec<WhereExpression> {
    let clause = clause.trim();
    if clause.is_empty() {
        return Vec::new();
    }
    let parts: Vec<&str> = match compiled(&CONJUNCTION, r"(?i)\s+AND\s+") {
        Some(regex) => regex.split(clause).collect(),
        None => vec![clause],
    };
    parts
        .into_iter()
        .filter_map(|part| {
            let expression = parse_expression(part);
            if expression.is_none() {
                warn!(clause = part, "dropping unreadable where clause");
            }
            expression
        })
        .collect()
}

fn parse_expression(part: &str) -> Option<WhereExpression> {
    let (operator, field, raw) = ComparisonOperator::ALL
        .iter()
        .find_map(|op| part.split_once(op.as_str()).map(|(l, r)| (*op, l, r)))?;
    let field = field.trim();
    let raw = raw.trim();
    if field.is_empty() || raw.is_empty() {
        return None;
    }
    Some(WhereExpression {
        field: field.to_string(),
        operator,
        value: parse_value(raw),
    })
}

fn parse_value(raw: &str) -> ExpressionValue {
    let timestamp = compiled(&TIMESTAMP_LITERAL, r"(?i)TIMESTAMP\s*'([^']*)'")
        .and_then(|regex| regex.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|literal| literal.as_str().trim());
    match timestamp {
        Some(literal) => ExpressionValue::Date(
            parse_timestamp(literal).map_or_else(|| literal.to_string(), format_timestamp),
        ),
        None => ExpressionValue::Literal(strip_quotes(raw).to_string()),
    }
}

fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(raw)
}
