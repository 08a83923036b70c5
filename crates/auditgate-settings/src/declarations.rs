//! Persisted exception declarations (`.nsprc`).
//!
//! Two shapes are accepted:
//!
//! ```json
//! { "1001": { "active": true, "expiry": "2024-12-31", "notes": "no fix yet" },
//!   "lodash": { "kind": "module" },
//!   "1002": true,
//!   "1003": "tracked in JIRA-42" }
//! ```
//!
//! ```json
//! [ { "id": 1001, "expiry": 1735603200000 }, { "module": "lodash", "notes": "dev only" } ]
//! ```

use anyhow::Context;
use auditgate_domain::model::{DeclarationRecord, ExceptionKind};
use auditgate_types::AdvisoryId;
use serde::Deserialize;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedDeclarations {
    /// Records in file order. Records that could not be read carry no key.
    pub records: Vec<DeclarationRecord>,
    /// Why records were dropped.
    pub warnings: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDeclaration {
    id: Option<AdvisoryId>,
    module: Option<String>,
    kind: Option<String>,
    active: Option<bool>,
    expiry: Option<Value>,
    notes: Option<String>,
}

pub(crate) fn parse_declarations_json(input: &str) -> anyhow::Result<ParsedDeclarations> {
    let mut parsed = ParsedDeclarations::default();
    if input.trim().is_empty() {
        return Ok(parsed);
    }

    let value: Value = serde_json::from_str(input).context("parse exceptions file as JSON")?;
    match value {
        Value::Object(map) => {
            for (key, raw) in map {
                let record = map_entry(&key, raw, &mut parsed.warnings);
                parsed.records.push(record);
            }
        }
        Value::Array(items) => {
            for (idx, raw) in items.into_iter().enumerate() {
                let record = list_entry(idx, raw, &mut parsed.warnings);
                parsed.records.push(record);
            }
        }
        _ => anyhow::bail!("exceptions file must be a JSON object or array"),
    }

    Ok(parsed)
}

fn map_entry(key: &str, raw: Value, warnings: &mut Vec<String>) -> DeclarationRecord {
    match raw {
        Value::Bool(true) => DeclarationRecord::id(key),
        Value::Bool(false) => DeclarationRecord::id(key).inactive(),
        Value::String(notes) => DeclarationRecord::id(key).with_notes(notes),
        Value::Object(_) => match serde_json::from_value::<RawDeclaration>(raw) {
            Ok(decl) => {
                let kind = match decl.kind.as_deref().map(str::trim) {
                    None | Some("id") => ExceptionKind::Id,
                    Some("module") => ExceptionKind::Module,
                    Some(other) => {
                        warnings.push(format!(
                            "exception {key}: unknown kind `{other}` (expected id|module); treated as id"
                        ));
                        ExceptionKind::Id
                    }
                };
                finish(Some(key.to_string()), kind, decl, key, warnings)
            }
            Err(err) => {
                warnings.push(format!(
                    "exception {key}: unreadable declaration: {err}; listed as inactive"
                ));
                DeclarationRecord::id(key).inactive()
            }
        },
        other => {
            warnings.push(format!(
                "exception {key}: unsupported declaration value `{other}`; listed as inactive"
            ));
            DeclarationRecord::id(key).inactive()
        }
    }
}

fn list_entry(idx: usize, raw: Value, warnings: &mut Vec<String>) -> DeclarationRecord {
    let label = format!("#{}", idx + 1);
    let decl = match serde_json::from_value::<RawDeclaration>(raw) {
        Ok(decl) => decl,
        Err(err) => {
            warnings.push(format!("exception {label}: unreadable declaration: {err}"));
            return malformed();
        }
    };

    let (key, kind) = match (&decl.id, &decl.module) {
        (Some(id), _) => (Some(id.to_string()), ExceptionKind::Id),
        (None, Some(module)) => (Some(module.clone()), ExceptionKind::Module),
        (None, None) => (None, ExceptionKind::Id),
    };
    finish(key, kind, decl, &label, warnings)
}

fn finish(
    key: Option<String>,
    kind: ExceptionKind,
    decl: RawDeclaration,
    label: &str,
    warnings: &mut Vec<String>,
) -> DeclarationRecord {
    let mut active = decl.active.unwrap_or(true);
    let expiry = match decl.expiry.as_ref().filter(|v| !is_blank(v)) {
        None => None,
        Some(raw) => match parse_expiry(raw) {
            Some(date) => Some(date),
            None if key.is_some() => {
                // Keep the entry visible in the report, but never let it suppress.
                warnings.push(format!(
                    "exception {label}: unreadable expiry `{raw}`; listed as inactive"
                ));
                active = false;
                None
            }
            None => None,
        },
    };

    DeclarationRecord {
        key,
        kind,
        expiry,
        notes: decl.notes.unwrap_or_default(),
        active,
    }
}

/// `null` and empty strings mean "never expires".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn malformed() -> DeclarationRecord {
    DeclarationRecord {
        key: None,
        kind: ExceptionKind::Id,
        expiry: None,
        notes: String::new(),
        active: false,
    }
}

/// Parse an expiry value into a UTC calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and epoch milliseconds
/// (as a number or numeric string).
pub fn parse_expiry(raw: &Value) -> Option<Date> {
    match raw {
        Value::Number(n) => n.as_i64().and_then(date_from_epoch_millis),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(date) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
                return Some(date);
            }
            if let Ok(ts) = OffsetDateTime::parse(s, &Rfc3339) {
                return Some(ts.to_offset(UtcOffset::UTC).date());
            }
            s.parse::<i64>().ok().and_then(date_from_epoch_millis)
        }
        _ => None,
    }
}

fn date_from_epoch_millis(ms: i64) -> Option<Date> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .ok()
        .map(|ts| ts.date())
}
