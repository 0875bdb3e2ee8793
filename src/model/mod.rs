//! Data model for reconstructed exams.
//!
//! These types bridge page-geometry extraction and output rendering. Everything
//! is built once during a single pass and serializes with a fixed key set.

mod document;
mod geometry;
mod question;
mod table;

pub use document::{ExamDocument, ExamMetadata, ImageRef};
pub use geometry::{BoundingBox, Point};
pub use question::{ChoiceType, Instruction, Question, CHOICE_COUNT};
pub use table::{TableGrid, TableRegion};
