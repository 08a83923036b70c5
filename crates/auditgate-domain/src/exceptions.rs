//! The exception store: merges persisted declarations with command-line keys.

use crate::model::{DeclarationRecord, ExceptionEntry, ExceptionKind};
use auditgate_types::{ExceptionStatus, ids};
use time::Date;

/// Ordered, de-duplicated exceptions, evaluated against a fixed date.
///
/// Read-only once built; the engine tracks usage separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptionSet {
    entries: Vec<ExceptionEntry>,
    evaluated_on: Date,
}

/// Exception report row: `(key, status, expiry, notes)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptionRow {
    pub key: String,
    pub status: ExceptionStatus,
    pub expiry: Option<Date>,
    pub notes: String,
}

impl ExceptionRow {
    /// Expiry as `YYYY-MM-DD`, or `never`.
    pub fn expiry_display(&self) -> String {
        match self.expiry {
            Some(d) => d.to_string(),
            None => ids::EXPIRY_NEVER.to_string(),
        }
    }

    pub fn cells(&self) -> [String; 4] {
        [
            self.key.clone(),
            self.status.as_str().to_string(),
            self.expiry_display(),
            self.notes.clone(),
        ]
    }
}

impl ExceptionSet {
    pub fn empty(today: Date) -> Self {
        Self {
            entries: Vec::new(),
            evaluated_on: today,
        }
    }

    /// Build the set from persisted declarations followed by ad-hoc keys.
    ///
    /// Records without a key are skipped. Ad-hoc keys are trimmed, empty ones
    /// dropped, and become non-expiring entries. A later `(kind, key)` replaces
    /// the earlier value but keeps the earlier position.
    pub fn build<I>(records: I, adhoc_ids: &[String], adhoc_modules: &[String], today: Date) -> Self
    where
        I: IntoIterator<Item = DeclarationRecord>,
    {
        let mut set = ExceptionSet::empty(today);

        for record in records {
            let Some(key) = record.key.as_deref().map(str::trim) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            set.upsert(ExceptionEntry {
                kind: record.kind,
                key: key.to_string(),
                expiry: record.expiry,
                notes: record.notes,
                active: record.active,
            });
        }

        for key in adhoc_keys(adhoc_ids) {
            set.upsert(ExceptionEntry::id(key));
        }
        for key in adhoc_keys(adhoc_modules) {
            set.upsert(ExceptionEntry::module(key));
        }

        set
    }

    fn upsert(&mut self, entry: ExceptionEntry) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.kind == entry.kind && e.key == entry.key)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn entries(&self) -> &[ExceptionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn evaluated_on(&self) -> Date {
        self.evaluated_on
    }

    pub fn status(&self, entry: &ExceptionEntry) -> ExceptionStatus {
        entry.status(self.evaluated_on)
    }

    /// Position of the entry that can suppress a finding with this key, if any.
    ///
    /// Only active, unexpired entries qualify.
    pub fn effective(&self, kind: ExceptionKind, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| {
            e.kind == kind && e.key == key && self.status(e) == ExceptionStatus::Active
        })
    }

    /// Report view: one row per entry in declaration order.
    pub fn report_rows(&self) -> Vec<ExceptionRow> {
        self.entries
            .iter()
            .map(|e| ExceptionRow {
                key: e.key.clone(),
                status: self.status(e),
                expiry: e.expiry,
                notes: e.notes.clone(),
            })
            .collect()
    }
}

fn adhoc_keys(keys: &[String]) -> impl Iterator<Item = &str> {
    keys.iter().map(|k| k.trim()).filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 15);

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn records_without_key_are_skipped() {
        let mut malformed = DeclarationRecord::id("ignored");
        malformed.key = None;
        let blank = DeclarationRecord::id("   ");

        let set = ExceptionSet::build(
            vec![malformed, DeclarationRecord::id("1001"), blank],
            &[],
            &[],
            TODAY,
        );

        assert_eq!(set.len(), 1);
        assert_eq!(set.entries()[0].key, "1001");
    }

    #[test]
    fn adhoc_keys_are_trimmed_and_empties_dropped() {
        let set = ExceptionSet::build(
            Vec::new(),
            &strings(&[" 1001 ", "", "  ", "GHSA-x"]),
            &strings(&["", " lodash"]),
            TODAY,
        );

        let keys: Vec<_> = set
            .entries()
            .iter()
            .map(|e| (e.kind, e.key.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (ExceptionKind::Id, "1001"),
                (ExceptionKind::Id, "GHSA-x"),
                (ExceptionKind::Module, "lodash"),
            ]
        );
        assert!(set.entries().iter().all(|e| e.expiry.is_none()));
    }

    #[test]
    fn later_declaration_overwrites_but_keeps_position() {
        let set = ExceptionSet::build(
            vec![
                DeclarationRecord::id("1001").with_notes("first"),
                DeclarationRecord::id("1002"),
                DeclarationRecord::id("1001").with_notes("second"),
            ],
            &[],
            &[],
            TODAY,
        );

        assert_eq!(set.len(), 2);
        assert_eq!(set.entries()[0].key, "1001");
        assert_eq!(set.entries()[0].notes, "second");
    }

    #[test]
    fn adhoc_id_overrides_persisted_expiry() {
        let set = ExceptionSet::build(
            vec![DeclarationRecord::id("1001").with_expiry(date!(2020 - 01 - 01))],
            &strings(&["1001"]),
            &[],
            TODAY,
        );

        assert_eq!(set.len(), 1);
        assert_eq!(set.status(&set.entries()[0]), ExceptionStatus::Active);
    }

    #[test]
    fn same_key_different_kind_are_distinct() {
        let set = ExceptionSet::build(
            vec![DeclarationRecord::id("lodash"), DeclarationRecord::module("lodash")],
            &[],
            &[],
            TODAY,
        );
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn effective_ignores_expired_and_inactive() {
        let set = ExceptionSet::build(
            vec![
                DeclarationRecord::id("1").with_expiry(date!(2024 - 06 - 14)),
                DeclarationRecord::id("2").inactive(),
                DeclarationRecord::id("3").with_expiry(TODAY),
            ],
            &[],
            &[],
            TODAY,
        );

        assert_eq!(set.effective(ExceptionKind::Id, "1"), None);
        assert_eq!(set.effective(ExceptionKind::Id, "2"), None);
        assert_eq!(set.effective(ExceptionKind::Id, "3"), Some(2));
        assert_eq!(set.effective(ExceptionKind::Module, "3"), None);
    }

    #[test]
    fn report_rows_format_status_and_expiry() {
        let set = ExceptionSet::build(
            vec![
                DeclarationRecord::id("1001")
                    .with_expiry(date!(2024 - 01 - 31))
                    .with_notes("waiting on upstream"),
                DeclarationRecord::module("minimist"),
            ],
            &[],
            &[],
            TODAY,
        );

        let rows: Vec<[String; 4]> = set.report_rows().iter().map(ExceptionRow::cells).collect();
        assert_eq!(
            rows,
            vec![
                [
                    "1001".to_string(),
                    "expired".to_string(),
                    "2024-01-31".to_string(),
                    "waiting on upstream".to_string(),
                ],
                [
                    "minimist".to_string(),
                    "active".to_string(),
                    "never".to_string(),
                    String::new(),
                ],
            ]
        );
    }
}
