//! JSON rendering for exam documents.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ExamDocument, TableRegion};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
///
/// Output is deterministic: the same document always renders to the same bytes.
pub fn to_json(doc: &ExamDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert table regions to JSON.
pub fn to_tables_json(tables: &[TableRegion], format: JsonFormat) -> Result<String> {
    serialize(tables, format)
}

/// Render an error as a `{"success": false, "error": ...}` body.
pub fn failure_json(error: &Error) -> String {
    serde_json::json!({
        "success": false,
        "error": error.to_string(),
    })
    .to_string()
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Question};

    fn document() -> ExamDocument {
        ExamDocument {
            subject: Some("클라우드컴퓨팅".to_string()),
            subject_code: None,
            year: 2024,
            semester: 2,
            total_questions: 1,
            expected_questions: None,
            questions: vec![Question::new(1, 1, "질문", vec!["가".to_string()])],
            images: Vec::new(),
            tables: Vec::new(),
            common_instructions: Vec::new(),
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&document(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"subject\""));
        assert!(json.contains("클라우드컴퓨팅"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&document(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }

    #[test]
    fn test_every_key_is_present() {
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&document(), JsonFormat::Compact).unwrap()).unwrap();

        assert!(value["subject_code"].is_null());
        assert!(value["expected_questions"].is_null());

        let question = &value["questions"][0];
        for key in [
            "number",
            "page",
            "question",
            "choices",
            "choice_type",
            "answer",
            "has_image",
            "image_ref",
            "has_table",
            "table_ref",
            "table_data",
            "choice_tables",
            "common_instruction",
        ] {
            assert!(question.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(question["choices"].as_array().unwrap().len(), 4);
        assert_eq!(question["choice_type"], "text");
    }

    #[test]
    fn test_render_is_idempotent() {
        let doc = document();
        let first = to_json(&doc, JsonFormat::Pretty).unwrap();
        let reparsed: ExamDocument = serde_json::from_str(&first).unwrap();
        assert_eq!(to_json(&reparsed, JsonFormat::Pretty).unwrap(), first);
    }

    #[test]
    fn test_tables_json() {
        let tables = vec![TableRegion::new(
            2,
            1,
            BoundingBox::new(10.0, 20.0, 110.0, 70.0),
            vec![vec![Some("a".to_string()), None]],
        )];
        let value: serde_json::Value =
            serde_json::from_str(&to_tables_json(&tables, JsonFormat::Compact).unwrap()).unwrap();

        assert_eq!(value[0]["page"], 2);
        assert_eq!(value[0]["bbox"][2], 110.0);
        assert_eq!(value[0]["width"], 100.0);
        assert!(value[0]["data"][0][1].is_null());
    }

    #[test]
    fn test_failure_json() {
        let body = failure_json(&Error::UnknownFormat);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("Unknown input format"));
    }
}
