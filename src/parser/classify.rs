//! Choice classification.
//!
//! Decides whether a question on a page with tables presents its choices as
//! tables. Each signal is a separate predicate so it can be tested and tuned
//! on its own.

use regex::Regex;

use crate::model::{ChoiceType, CHOICE_COUNT};

/// Table regions a page needs before its choices can be tables.
pub const MIN_CHOICE_TABLES: usize = CHOICE_COUNT;

/// A choice shorter than this (in characters, after trimming) counts as sparse.
pub const SPARSE_CHOICE_LEN: usize = 10;

/// Sparse choices needed before choices are assumed to be tables.
pub const MIN_SPARSE_CHOICES: usize = 2;

/// Stem fragments that indicate matrix or array questions.
pub const MATRIX_NOTATIONS: [&str; 6] = ["dim(", "array(", "matrix(", "%*%", "A[", "B["];

/// Classify the choices of a question on a page with `table_count` tables.
///
/// Returns [`ChoiceType::Table`] when any signal fires. The caller still needs
/// at least [`MIN_CHOICE_TABLES`] tables to actually lay them out as choices.
pub fn classify_choices(table_count: usize, choices: &[String], stem: &str) -> ChoiceType {
    let is_table = has_table_reference(choices)
        || (table_count >= MIN_CHOICE_TABLES && has_sparse_choices(choices))
        || (table_count >= MIN_CHOICE_TABLES && has_matrix_notation(stem));

    if is_table {
        ChoiceType::Table
    } else {
        ChoiceType::Text
    }
}

/// A choice contains a bracketed index list such as `[1,2]` or `[]`.
pub fn has_table_reference(choices: &[String]) -> bool {
    let pattern = Regex::new(r"\[[0-9,]*\]").unwrap();
    choices.iter().any(|c| pattern.is_match(c))
}

/// At least two choices are shorter than ten characters; empty choices count.
pub fn has_sparse_choices(choices: &[String]) -> bool {
    choices
        .iter()
        .filter(|c| c.trim().chars().count() < SPARSE_CHOICE_LEN)
        .count()
        >= MIN_SPARSE_CHOICES
}

/// The stem uses matrix or array notation.
pub fn has_matrix_notation(stem: &str) -> bool {
    MATRIX_NOTATIONS.iter().any(|n| stem.contains(n))
}
