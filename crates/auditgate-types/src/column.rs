//! Report columns.
//!
//! The canonical order of [`Column::ALL`] is the order cells appear in every
//! rendered row, whatever order the user requested them in.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Columns of the security (vulnerability) report.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Column {
    #[serde(rename = "ID")]
    Id,
    Module,
    Title,
    Paths,
    Severity,
    #[serde(rename = "URL")]
    Url,
    #[serde(rename = "Ex.")]
    Excepted,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::Module,
        Column::Title,
        Column::Paths,
        Column::Severity,
        Column::Url,
        Column::Excepted,
    ];

    /// Display name used as the table header.
    pub fn header(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Module => "Module",
            Column::Title => "Title",
            Column::Paths => "Paths",
            Column::Severity => "Severity",
            Column::Url => "URL",
            Column::Excepted => "Ex.",
        }
    }

    /// Property name used in the structured report.
    pub fn key(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Module => "module",
            Column::Title => "title",
            Column::Paths => "paths",
            Column::Severity => "severity",
            Column::Url => "url",
            Column::Excepted => "isExcepted",
        }
    }

    /// Match a user-supplied column name against the header or key, ignoring case.
    pub fn parse(name: &str) -> Option<Column> {
        let name = name.trim();
        Column::ALL.into_iter().find(|c| {
            c.header().eq_ignore_ascii_case(name) || c.key().eq_ignore_ascii_case(name)
        })
    }
}

/// Columns of the exception report. Always rendered in full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExceptionColumn {
    Id,
    Status,
    Expiry,
    Notes,
}

impl ExceptionColumn {
    pub const ALL: [ExceptionColumn; 4] = [
        ExceptionColumn::Id,
        ExceptionColumn::Status,
        ExceptionColumn::Expiry,
        ExceptionColumn::Notes,
    ];

    pub fn header(self) -> &'static str {
        match self {
            ExceptionColumn::Id => "ID",
            ExceptionColumn::Status => "Status",
            ExceptionColumn::Expiry => "Expiry",
            ExceptionColumn::Notes => "Notes",
        }
    }
}
