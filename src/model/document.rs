//! Document-level result types.

use super::{Instruction, Question, TableRegion};
use serde::{Deserialize, Serialize};

/// Exam metadata read from the header table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamMetadata {
    /// Subject name
    pub subject: Option<String>,

    /// Subject code
    pub subject_code: Option<String>,

    /// Question count printed in the header
    pub expected_questions: Option<u32>,

    /// Academic year, when printed
    pub year: Option<i32>,

    /// Semester, when printed
    pub semester: Option<u32>,
}

impl ExamMetadata {
    /// Check if nothing was recognized.
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.subject_code.is_none()
            && self.expected_questions.is_none()
            && self.year.is_none()
            && self.semester.is_none()
    }
}

/// An image manifest entry. Only names and paths are produced; image bytes are
/// written by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Page number (1-indexed)
    pub page: u32,

    /// Image order on the page (1-indexed)
    pub index: u32,

    /// Suggested file name
    pub filename: String,

    /// Suggested output path
    pub path: String,
}

impl ImageRef {
    /// Create a manifest entry under `image_dir`.
    pub fn new(page: u32, index: u32, image_dir: &str) -> Self {
        let filename = format!("page{}_img{}.png", page, index);
        let path = if image_dir.is_empty() {
            filename.clone()
        } else {
            format!("{}/{}", image_dir.trim_end_matches('/'), filename)
        };
        Self {
            page,
            index,
            filename,
            path,
        }
    }
}

/// The reconstructed exam document.
///
/// Every key is always serialized; unknown values are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamDocument {
    /// Subject name
    pub subject: Option<String>,

    /// Subject code
    pub subject_code: Option<String>,

    /// Academic year
    pub year: i32,

    /// Semester
    pub semester: u32,

    /// Number of reconstructed questions
    pub total_questions: usize,

    /// Question count printed in the header
    pub expected_questions: Option<u32>,

    /// Questions, unique by number and sorted ascending
    pub questions: Vec<Question>,

    /// Image manifest
    pub images: Vec<ImageRef>,

    /// Every detected table region, in page order
    pub tables: Vec<TableRegion>,

    /// Shared instructions, in text order
    pub common_instructions: Vec<Instruction>,
}

impl ExamDocument {
    /// Get a question by its printed number.
    pub fn question(&self, number: u32) -> Option<&Question> {
        self.questions
            .binary_search_by_key(&number, |q| q.number)
            .ok()
            .map(|i| &self.questions[i])
    }

    /// Share of the expected question count that was reconstructed, in percent.
    pub fn extraction_rate(&self) -> Option<f64> {
        match self.expected_questions {
            Some(expected) if expected > 0 => {
                Some(self.total_questions as f64 / expected as f64 * 100.0)
            }
            _ => None,
        }
    }

    /// Check if no question was reconstructed.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
