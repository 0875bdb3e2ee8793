//! Rendering module for writing extraction results.

mod json;
mod result;
mod text;

pub use json::{failure_json, to_json, to_tables_json, JsonFormat};
pub use result::ExtractionStats;
pub use text::to_page_text;
