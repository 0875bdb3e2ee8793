//! Exam metadata from the header table.
//!
//! Exam sheets open with a header table naming the subject, its code, the number
//! of questions and the term. Rows are matched by keyword; when several rows
//! match, the later one wins.

use regex::Regex;

use crate::model::{ExamMetadata, TableRegion};

use super::options::ExtractOptions;

/// Extract exam metadata from the first detected table of a document.
pub fn extract_exam_metadata(first_table: &TableRegion, options: &ExtractOptions) -> ExamMetadata {
    let metadata = MetadataScanner::new(&options.subject_keywords).scan(first_table);
    log::info!(
        "Metadata: subject={:?}, code={:?}, questions={:?}",
        metadata.subject,
        metadata.subject_code,
        metadata.expected_questions
    );
    metadata
}

struct MetadataScanner<'a> {
    subject_keywords: &'a [String],
    digits: Regex,
    question_count: Regex,
    year: Regex,
    semester: Regex,
}

impl<'a> MetadataScanner<'a> {
    fn new(subject_keywords: &'a [String]) -> Self {
        Self {
            subject_keywords,
            digits: Regex::new(r"[0-9]+").unwrap(),
            question_count: Regex::new(r"([0-9]+)\s*문항").unwrap(),
            year: Regex::new(r"([0-9]{4})\s*학년도").unwrap(),
            semester: Regex::new(r"([12])\s*학기").unwrap(),
        }
    }

    fn scan(&self, table: &TableRegion) -> ExamMetadata {
        let mut metadata = ExamMetadata::default();

        for row in table.row_texts() {
            let compact: String = row.chars().filter(|c| *c != ' ').collect();

            if self.is_subject_row(&compact) {
                metadata.subject = Some(self.digits.replace_all(&compact, "").trim().to_string());
                if let Some(code) = self.digits.find(&row) {
                    metadata.subject_code = Some(code.as_str().to_string());
                }
            }

            if compact.contains("문항") {
                let count = self
                    .capture_number(&self.question_count, &row)
                    .or_else(|| self.capture_number(&self.question_count, &compact));
                if let Some(count) = count {
                    metadata.expected_questions = Some(count);
                }
            }

            if let Some(year) = self.capture_number(&self.year, &row) {
                metadata.year = Some(year as i32);
            }
            if let Some(semester) = self.capture_number(&self.semester, &row) {
                metadata.semester = Some(semester);
            }
        }

        metadata
    }

    fn is_subject_row(&self, compact: &str) -> bool {
        self.subject_keywords.iter().any(|keyword| {
            let keyword: String = keyword.chars().filter(|c| *c != ' ').collect();
            !keyword.is_empty() && compact.contains(&keyword)
        })
    }

    fn capture_number(&self, pattern: &Regex, text: &str) -> Option<u32> {
        pattern.captures(text)?.get(1)?.as_str().parse().ok()
    }
}
