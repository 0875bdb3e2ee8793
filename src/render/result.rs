//! Extraction summary statistics.

use serde::{Deserialize, Serialize};

use crate::model::ChoiceType;
use crate::parser::Extraction;

/// Counts collected from one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of pages processed
    pub page_count: usize,

    /// Number of reconstructed questions
    pub question_count: usize,

    /// Question count printed in the header, if any
    pub expected_questions: Option<u32>,

    /// Number of table regions
    pub table_count: usize,

    /// Number of image manifest entries
    pub image_count: usize,

    /// Number of shared instructions
    pub instruction_count: usize,

    /// Questions whose choices are tables
    pub table_choice_count: usize,

    /// Questions with at least one empty choice slot
    pub incomplete_choice_count: usize,

    /// Reconstructed share of the expected questions, in percent
    pub extraction_rate: Option<f64>,
}

impl ExtractionStats {
    /// Collect statistics from an extraction.
    pub fn from_extraction(extraction: &Extraction) -> Self {
        let doc = &extraction.document;
        Self {
            page_count: extraction.pages.len(),
            question_count: doc.total_questions,
            expected_questions: doc.expected_questions,
            table_count: doc.tables.len(),
            image_count: doc.images.len(),
            instruction_count: doc.common_instructions.len(),
            table_choice_count: doc
                .questions
                .iter()
                .filter(|q| q.choice_type == ChoiceType::Table)
                .count(),
            incomplete_choice_count: doc
                .questions
                .iter()
                .filter(|q| q.choice_type == ChoiceType::Text && q.filled_choice_count() < 4)
                .count(),
            extraction_rate: doc.extraction_rate(),
        }
    }

    /// Check if every expected question was reconstructed.
    pub fn is_complete(&self) -> bool {
        match self.expected_questions {
            Some(expected) => self.question_count >= expected as usize,
            None => false,
        }
    }
}
