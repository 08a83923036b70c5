use crate::exceptions::ExceptionSet;
use crate::model::{DeclarationRecord, Finding};
use auditgate_types::{AdvisoryId, Severity};
use time::Date;
use time::macros::date;

pub const TODAY: Date = date!(2024 - 06 - 15);

pub fn finding(id: &str, module: &str, severity: Severity) -> Finding {
    Finding {
        id: AdvisoryId::new(id),
        module: module.to_string(),
        title: format!("Advisory {id}"),
        severity,
        paths: vec![module.to_string()],
        url: format!("https://npmjs.com/advisories/{id}"),
    }
}

pub fn exceptions(records: Vec<DeclarationRecord>) -> ExceptionSet {
    ExceptionSet::build(records, &[], &[], TODAY)
}

pub fn yesterday() -> Date {
    TODAY.previous_day().unwrap_or(TODAY)
}
