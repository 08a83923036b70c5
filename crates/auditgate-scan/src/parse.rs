use crate::{ParsedScan, PayloadFormat, ScanError};
use auditgate_domain::model::Finding;
use auditgate_types::{AdvisoryId, Severity};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyAdvisory {
    id: Option<AdvisoryId>,
    module_name: String,
    title: String,
    severity: Option<String>,
    url: String,
    findings: Vec<LegacyFinding>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyFinding {
    paths: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModernVulnerability {
    name: String,
    nodes: Vec<String>,
    via: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModernVia {
    source: Option<AdvisoryId>,
    name: String,
    title: String,
    url: String,
    severity: Option<String>,
}

/// Parse an `npm audit --json` document.
///
/// `advisories` (npm 6) wins over `vulnerabilities` (npm 7+) when both exist.
pub fn parse_audit_json(text: &str) -> Result<ParsedScan, ScanError> {
    let value: Value = serde_json::from_str(text)?;
    let Some(root) = value.as_object() else {
        return Err(ScanError::NotAnObject);
    };

    let mut out = Collector::default();

    if let Some(advisories) = root.get("advisories").and_then(Value::as_object) {
        parse_advisories(advisories, &mut out);
        return Ok(out.finish(PayloadFormat::Advisories));
    }

    if let Some(vulnerabilities) = root.get("vulnerabilities").and_then(Value::as_object) {
        parse_vulnerabilities(vulnerabilities, &mut out);
        return Ok(out.finish(PayloadFormat::Vulnerabilities));
    }

    if let Some(error) = root.get("error") {
        return Err(ScanError::ScannerError(scanner_error_summary(error)));
    }

    Err(ScanError::MissingFindings)
}

fn parse_advisories(advisories: &Map<String, Value>, out: &mut Collector) {
    for (key, raw) in advisories {
        let advisory: LegacyAdvisory = match serde_json::from_value(raw.clone()) {
            Ok(a) => a,
            Err(err) => {
                out.warn(format!("advisory {key}: unreadable record: {err}"));
                continue;
            }
        };

        let id = advisory
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| AdvisoryId::new(key));
        if id.is_empty() {
            out.warn("advisory with empty id skipped".to_string());
            continue;
        }

        let Some(severity) = out.severity(&id, advisory.severity.as_deref()) else {
            continue;
        };

        let paths = advisory
            .findings
            .into_iter()
            .flat_map(|f| f.paths)
            .collect();

        out.push(Finding {
            id,
            module: advisory.module_name,
            title: advisory.title,
            severity,
            paths,
            url: advisory.url,
        });
    }
}

fn parse_vulnerabilities(vulnerabilities: &Map<String, Value>, out: &mut Collector) {
    for (package, raw) in vulnerabilities {
        let vulnerability: ModernVulnerability = match serde_json::from_value(raw.clone()) {
            Ok(v) => v,
            Err(err) => {
                out.warn(format!("package {package}: unreadable record: {err}"));
                continue;
            }
        };

        // String entries in `via` point at other packages; only objects are advisories.
        for via in vulnerability.via.iter().filter(|v| v.is_object()) {
            let via: ModernVia = match serde_json::from_value(via.clone()) {
                Ok(v) => v,
                Err(err) => {
                    out.warn(format!("package {package}: unreadable advisory: {err}"));
                    continue;
                }
            };

            let Some(id) = via.source.filter(|id| !id.is_empty()) else {
                out.warn(format!("package {package}: advisory without source id skipped"));
                continue;
            };

            let Some(severity) = out.severity(&id, via.severity.as_deref()) else {
                continue;
            };

            let module = if via.name.is_empty() {
                if vulnerability.name.is_empty() {
                    package.clone()
                } else {
                    vulnerability.name.clone()
                }
            } else {
                via.name
            };

            out.push(Finding {
                id,
                module,
                title: via.title,
                severity,
                paths: vulnerability.nodes.clone(),
                url: via.url,
            });
        }
    }
}

fn scanner_error_summary(error: &Value) -> String {
    if let Some(s) = error.as_str() {
        return s.to_string();
    }
    ["summary", "code"]
        .iter()
        .find_map(|k| error.get(*k).and_then(Value::as_str))
        .unwrap_or("unknown error")
        .to_string()
}

#[derive(Default)]
struct Collector {
    findings: Vec<Finding>,
    warnings: Vec<String>,
}

impl Collector {
    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    fn severity(&mut self, id: &AdvisoryId, raw: Option<&str>) -> Option<Severity> {
        match raw.map(str::parse::<Severity>) {
            Some(Ok(severity)) => Some(severity),
            Some(Err(err)) => {
                self.warn(format!("advisory {id}: {err}; skipped"));
                None
            }
            None => {
                self.warn(format!("advisory {id}: missing severity; skipped"));
                None
            }
        }
    }

    /// Merge into an existing finding with the same id, or append.
    fn push(&mut self, mut finding: Finding) {
        dedup_in_place(&mut finding.paths);
        match self.findings.iter_mut().find(|f| f.id == finding.id) {
            Some(existing) => {
                for path in finding.paths {
                    if !existing.paths.contains(&path) {
                        existing.paths.push(path);
                    }
                }
            }
            None => self.findings.push(finding),
        }
    }

    fn finish(self, format: PayloadFormat) -> ParsedScan {
        ParsedScan {
            format,
            findings: self.findings,
            warnings: self.warnings,
        }
    }
}

fn dedup_in_place(paths: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(paths.len());
    paths.retain(|p| {
        if seen.contains(p) {
            false
        } else {
            seen.push(p.clone());
            true
        }
    });
}
