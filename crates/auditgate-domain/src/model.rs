use auditgate_types::{AdvisoryId, ExceptionStatus, Severity};
use time::Date;

/// One vulnerability instance from the scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub id: AdvisoryId,
    /// Affected package name.
    pub module: String,
    pub title: String,
    pub severity: Severity,
    /// Dependency chains leading to the affected package.
    pub paths: Vec<String>,
    pub url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExceptionKind {
    /// Suppresses a single advisory id.
    Id,
    /// Suppresses every advisory against a package.
    Module,
}

/// A declared exception after normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptionEntry {
    pub kind: ExceptionKind,
    pub key: String,
    /// Last day the exception applies. `None` never expires.
    pub expiry: Option<Date>,
    pub notes: String,
    /// `false` when the declaration switches the exception off.
    pub active: bool,
}

impl ExceptionEntry {
    pub fn id(key: impl Into<String>) -> Self {
        Self {
            kind: ExceptionKind::Id,
            key: key.into(),
            expiry: None,
            notes: String::new(),
            active: true,
        }
    }

    pub fn module(key: impl Into<String>) -> Self {
        Self {
            kind: ExceptionKind::Module,
            ..Self::id(key)
        }
    }

    /// Status on `today`. An entry expiring today is still active.
    pub fn status(&self, today: Date) -> ExceptionStatus {
        if !self.active {
            return ExceptionStatus::Inactive;
        }
        match self.expiry {
            Some(expiry) if expiry < today => ExceptionStatus::Expired,
            _ => ExceptionStatus::Active,
        }
    }
}

/// A raw declaration as read from the persisted exceptions file.
///
/// `key` is optional because the source record may be malformed; such records
/// are dropped when the exception set is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationRecord {
    pub key: Option<String>,
    pub kind: ExceptionKind,
    pub expiry: Option<Date>,
    pub notes: String,
    pub active: bool,
}

impl DeclarationRecord {
    pub fn id(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            kind: ExceptionKind::Id,
            expiry: None,
            notes: String::new(),
            active: true,
        }
    }

    pub fn module(key: impl Into<String>) -> Self {
        Self {
            kind: ExceptionKind::Module,
            ..Self::id(key)
        }
    }

    pub fn with_expiry(mut self, expiry: Date) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}
