//! Shared test utilities for the auditgate workspace.
//!
//! Builders emit the raw JSON text the CLI would read from disk or stdin, so
//! tests exercise the same parsing path as real scanner output.

use serde_json::{Map, Value, json};

/// One advisory for a legacy (`advisories`) payload.
#[derive(Clone, Debug)]
pub struct AdvisoryFixture {
    pub id: u64,
    pub module: String,
    pub severity: String,
    pub title: String,
    pub url: String,
    pub paths: Vec<String>,
}

/// Advisory with a generated title, URL, and a single path equal to the module.
pub fn advisory(id: u64, module: &str, severity: &str) -> AdvisoryFixture {
    AdvisoryFixture {
        id,
        module: module.to_string(),
        severity: severity.to_string(),
        title: format!("Advisory {id}"),
        url: format!("https://npmjs.com/advisories/{id}"),
        paths: vec![module.to_string()],
    }
}

impl AdvisoryFixture {
    pub fn with_paths(mut self, paths: &[&str]) -> Self {
        self.paths = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

/// npm 6 style payload: `{"advisories": {"<id>": {...}}}`.
pub fn legacy_payload(advisories: &[AdvisoryFixture]) -> String {
    let mut map = Map::new();
    for a in advisories {
        map.insert(
            a.id.to_string(),
            json!({
                "id": a.id,
                "module_name": a.module,
                "title": a.title,
                "severity": a.severity,
                "url": a.url,
                "findings": [ { "version": "1.0.0", "paths": a.paths } ],
            }),
        );
    }
    json!({ "advisories": map, "metadata": {} }).to_string()
}

/// npm 7+ style payload: `{"vulnerabilities": {"<package>": {"via": [...]}}}`.
///
/// Advisories for the same module are grouped under one package entry.
pub fn modern_payload(advisories: &[AdvisoryFixture]) -> String {
    let mut map = Map::new();
    for a in advisories {
        let entry = map.entry(a.module.clone()).or_insert_with(|| {
            json!({
                "name": a.module,
                "severity": a.severity,
                "nodes": a.paths,
                "via": [],
            })
        });
        if let Some(via) = entry.get_mut("via").and_then(Value::as_array_mut) {
            via.push(json!({
                "source": a.id,
                "name": a.module,
                "title": a.title,
                "url": a.url,
                "severity": a.severity,
            }));
        }
    }
    json!({ "auditReportVersion": 2, "vulnerabilities": map }).to_string()
}

/// `.nsprc` map form from `(key, declaration)` pairs.
pub fn declarations(entries: &[(&str, Value)]) -> String {
    let map: Map<String, Value> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Value::Object(map).to_string()
}

/// Read a string array field out of a report document.
pub fn string_list(report: &Value, key: &str) -> Vec<String> {
    report
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
