//! Question, choice, and shared-instruction types.

use super::TableGrid;
use serde::{Deserialize, Serialize};

/// Number of answer slots every question carries.
pub const CHOICE_COUNT: usize = 4;

/// Whether a question's choices are text or table regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceType {
    /// Choices came through as text
    #[default]
    Text,
    /// Choices are table regions matched to the four slots
    Table,
}

/// A shared preamble that applies to an inclusive range of question numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The full matched text, including marker and range
    pub text: String,

    /// Instruction body without marker and range
    pub content: String,

    /// First covered question number
    pub start: u32,

    /// Last covered question number (inclusive)
    pub end: u32,

    /// Every covered question number, `start..=end`
    pub questions: Vec<u32>,
}

impl Instruction {
    /// Create an instruction covering `start..=end`.
    pub fn new(text: impl Into<String>, content: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            text: text.into(),
            content: content.into(),
            start,
            end,
            questions: (start..=end).collect(),
        }
    }

    /// Check if the instruction covers a question number.
    pub fn covers(&self, number: u32) -> bool {
        (self.start..=self.end).contains(&number)
    }
}

/// A reconstructed exam question.
///
/// Every field is always present; optional values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question number as printed in the source (1-based, not re-sequenced)
    pub number: u32,

    /// Page the question was found on (1-indexed)
    pub page: u32,

    /// Question stem
    #[serde(rename = "question")]
    pub stem: String,

    /// The four answer slots; unused slots hold an empty string
    pub choices: [String; CHOICE_COUNT],

    /// Whether choices are text or tables
    pub choice_type: ChoiceType,

    /// Correct answer, when known
    pub answer: Option<u32>,

    /// Whether an image is attached
    pub has_image: bool,

    /// Attached image reference
    pub image_ref: Option<String>,

    /// Whether the question's page carries tables
    pub has_table: bool,

    /// Attached table reference
    pub table_ref: Option<String>,

    /// Supplementary page tables, for text-choice questions
    pub table_data: Option<Vec<TableGrid>>,

    /// Per-slot table data, for table-choice questions
    pub choice_tables: Option<[Option<TableGrid>; CHOICE_COUNT]>,

    /// Linked shared instruction
    pub common_instruction: Option<Instruction>,
}

impl Question {
    /// Create a text-choice question. Missing choices are padded with empty strings
    /// and extra ones are dropped.
    pub fn new(number: u32, page: u32, stem: impl Into<String>, choices: Vec<String>) -> Self {
        let mut slots: [String; CHOICE_COUNT] = Default::default();
        for (slot, choice) in slots.iter_mut().zip(choices) {
            *slot = choice;
        }

        Self {
            number,
            page,
            stem: stem.into(),
            choices: slots,
            choice_type: ChoiceType::Text,
            answer: None,
            has_image: false,
            image_ref: None,
            has_table: false,
            table_ref: None,
            table_data: None,
            choice_tables: None,
            common_instruction: None,
        }
    }

    /// Get the table data matched to a choice slot (0-indexed).
    pub fn choice_table(&self, slot: usize) -> Option<&TableGrid> {
        self.choice_tables
            .as_ref()
            .and_then(|tables| tables.get(slot))
            .and_then(Option::as_ref)
    }

    /// Check if the question has table choices.
    pub fn has_table_choices(&self) -> bool {
        self.choice_type == ChoiceType::Table
    }

    /// Number of non-empty choice slots.
    pub fn filled_choice_count(&self) -> usize {
        self.choices.iter().filter(|c| !c.is_empty()).count()
    }
}
