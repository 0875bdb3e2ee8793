//! Exam reconstruction from page geometry.

mod classify;
mod columns;
mod instructions;
mod lexer;
mod matcher;
mod metadata;
mod normalize;
mod options;
mod pipeline;
mod questions;
mod symbols;
mod tables;

pub use classify::{
    classify_choices, has_matrix_notation, has_sparse_choices, has_table_reference,
    MIN_CHOICE_TABLES,
};
pub use columns::{extract_columns, ColumnText};
pub use instructions::{extract_instructions, InstructionExtractor, MAX_INSTRUCTION_SPAN};
pub use lexer::{tokenize, Lexeme, Token};
pub use matcher::{
    match_by_symbols, match_tables_to_choices, sort_tables_by_position, SYMBOL_TOLERANCE,
    VERTICAL_WEIGHT,
};
pub use metadata::extract_exam_metadata;
pub use normalize::TextNormalizer;
pub use options::{ErrorMode, ExtractOptions, PageSelection};
pub use pipeline::{link_instructions, link_tables, ExamExtractor, Extraction};
pub use questions::{parse_questions, QuestionParser};
pub use symbols::{find_choice_symbols, symbol_slot, ChoiceSymbolPositions, CHOICE_SYMBOLS};
pub use tables::{group_by_page, locate_tables};
