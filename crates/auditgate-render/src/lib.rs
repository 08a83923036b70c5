//! Rendering utilities for terminal surfaces (tables, JSON report).

#![forbid(unsafe_code)]

mod json;
mod model;
mod table;

pub use json::render_report_json;
pub use model::RenderableTable;
pub use table::render_table;
