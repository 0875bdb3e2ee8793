//! Exam reconstruction.
//!
//! [`ExamExtractor`] drives one document through every stage, pages strictly in
//! order:
//!
//! 1. column text, table regions and the image manifest of each selected page
//! 2. header metadata from the first table
//! 3. shared instructions over the whole text
//! 4. question parsing
//! 5. instruction and table linking
//!
//! Every run owns its caches, so one extractor can serve many documents.

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::model::{
    ChoiceType, ExamDocument, ImageRef, Instruction, Question, TableGrid, TableRegion,
    CHOICE_COUNT,
};
use crate::source::{DocumentSource, PageSource};

use super::classify::{classify_choices, MIN_CHOICE_TABLES};
use super::columns::{extract_columns, ColumnText};
use super::instructions::InstructionExtractor;
use super::matcher::match_tables_to_choices;
use super::metadata::extract_exam_metadata;
use super::options::{ErrorMode, ExtractOptions};
use super::questions::QuestionParser;
use super::symbols::{find_choice_symbols, ChoiceSymbolPositions};
use super::tables::{group_by_page, locate_tables};

/// Choice text standing in for a matched table.
fn table_choice_label(slot: usize) -> String {
    format!("표 참조 (선택지 {})", slot + 1)
}

/// Result of one extraction run.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The reconstructed document
    pub document: ExamDocument,

    /// Column text of every processed page
    pub pages: Vec<ColumnText>,
}

/// Reconstructs exam documents from page geometry.
pub struct ExamExtractor {
    options: ExtractOptions,
    parser: QuestionParser,
    instructions: InstructionExtractor,
}

impl ExamExtractor {
    /// Create an extractor.
    pub fn new(options: ExtractOptions) -> Self {
        let parser = QuestionParser::new(options.normalize_unicode);
        Self {
            options,
            parser,
            instructions: InstructionExtractor::new(),
        }
    }

    /// Get the options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Reconstruct a document.
    pub fn extract<D: DocumentSource + ?Sized>(&self, source: &D) -> Result<Extraction> {
        let mode = self.options.error_mode;

        let mut pages: Vec<ColumnText> = Vec::new();
        let mut tables: Vec<TableRegion> = Vec::new();
        let mut images: Vec<ImageRef> = Vec::new();
        let mut page_sources: BTreeMap<u32, &D::Page> = BTreeMap::new();

        for page in source.pages() {
            let page_number = page.page_number();
            if !self.options.pages.includes(page_number) {
                continue;
            }

            pages.push(extract_columns(page, mode)?);
            tables.extend(locate_tables(page, &self.options.table_settings, mode)?);
            images.extend(self.image_manifest(page)?);
            page_sources.insert(page_number, page);
        }

        log::info!(
            "Read {} pages: {} tables, {} images",
            pages.len(),
            tables.len(),
            images.len()
        );

        let metadata = tables
            .first()
            .map(|table| extract_exam_metadata(table, &self.options))
            .unwrap_or_default();

        let full_text = pages
            .iter()
            .map(|p| p.full_text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let instructions = self.instructions.extract(&full_text);
        log::info!("Found {} common instructions", instructions.len());

        let mut questions = self.parser.parse_pages(&pages);
        link_instructions(&mut questions, &instructions);
        link_tables(&mut questions, &tables, &page_sources);

        let document = ExamDocument {
            subject: metadata.subject,
            subject_code: metadata.subject_code,
            year: metadata.year.unwrap_or(self.options.default_year),
            semester: metadata.semester.unwrap_or(self.options.default_semester),
            total_questions: questions.len(),
            expected_questions: metadata.expected_questions,
            questions,
            images,
            tables,
            common_instructions: instructions,
        };

        match document.extraction_rate() {
            Some(rate) => log::info!(
                "Reconstructed {} of {} questions ({:.1}%)",
                document.total_questions,
                document.expected_questions.unwrap_or_default(),
                rate
            ),
            None => log::info!("Reconstructed {} questions", document.total_questions),
        }

        Ok(Extraction { document, pages })
    }

    fn image_manifest<P: PageSource + ?Sized>(&self, page: &P) -> Result<Vec<ImageRef>> {
        let page_number = page.page_number();
        let count = match page.image_count() {
            Ok(count) => count,
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to list images on page {}: {}", page_number, e);
                0
            }
            Err(e) => return Err(e),
        };

        Ok((1..=count as u32)
            .map(|index| ImageRef::new(page_number, index, &self.options.image_dir))
            .collect())
    }
}

impl Default for ExamExtractor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

/// Attach each instruction to the questions it covers.
///
/// Instructions are applied in text order, so where ranges overlap the later
/// instruction wins.
pub fn link_instructions(questions: &mut [Question], instructions: &[Instruction]) {
    for instruction in instructions {
        for question in questions.iter_mut().filter(|q| instruction.covers(q.number)) {
            question.common_instruction = Some(instruction.clone());
        }
    }
}

/// Attach page tables to questions.
///
/// Questions on a page with tables get `has_table`. When the choices look like
/// tables and the page has enough of them, the tables are matched to choice slots;
/// otherwise every table of the page is attached as supplementary data. Symbol
/// positions are looked up at most once per page.
pub fn link_tables<P: PageSource + ?Sized>(
    questions: &mut [Question],
    tables: &[TableRegion],
    pages: &BTreeMap<u32, &P>,
) {
    let by_page = group_by_page(tables);
    let mut symbol_cache: HashMap<u32, ChoiceSymbolPositions> = HashMap::new();

    for question in questions.iter_mut() {
        let Some(page_tables) = by_page.get(&question.page) else {
            continue;
        };
        question.has_table = true;

        let choice_type = classify_choices(page_tables.len(), &question.choices, &question.stem);
        if choice_type == ChoiceType::Table && page_tables.len() >= MIN_CHOICE_TABLES {
            log::debug!("Question {}: matching table choices", question.number);
            let positions = symbol_cache.entry(question.page).or_insert_with(|| {
                pages
                    .get(&question.page)
                    .map(|page| find_choice_symbols(*page))
                    .unwrap_or_default()
            });

            let matched = match_tables_to_choices(page_tables, positions);
            apply_table_choices(question, &matched);
            log::info!(
                "Question {}: {} table choices matched",
                question.number,
                matched.iter().take(CHOICE_COUNT).flatten().count()
            );
        } else {
            question.choice_type = ChoiceType::Text;
            question.table_data = Some(page_tables.iter().map(|t| t.data.clone()).collect());
        }
    }
}

fn apply_table_choices(question: &mut Question, matched: &[Option<&TableRegion>]) {
    let mut choices: [String; CHOICE_COUNT] = Default::default();
    let mut choice_tables: [Option<TableGrid>; CHOICE_COUNT] = Default::default();

    for (slot, table) in matched.iter().take(CHOICE_COUNT).enumerate() {
        if let Some(table) = table {
            choices[slot] = table_choice_label(slot);
            choice_tables[slot] = Some(table.data.clone());
        }
    }

    question.choice_type = ChoiceType::Table;
    question.choices = choices;
    question.choice_tables = Some(choice_tables);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;
    use crate::source::{LayoutDocument, LayoutPage};

    fn grid(text: &str) -> TableGrid {
        vec![vec![Some(text.to_string())]]
    }

    fn question(number: u32, page: u32, choices: [&str; 4]) -> Question {
        Question::new(
            number,
            page,
            "질문",
            choices.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn test_link_instructions_last_wins() {
        let mut questions = vec![question(5, 1, ["", "", "", ""]), question(6, 1, ["", "", "", ""])];
        let instructions = vec![
            Instruction::new("※ a (5∼6)", "a", 5, 6),
            Instruction::new("※ b (6∼7)", "b", 6, 7),
        ];
        link_instructions(&mut questions, &instructions);

        assert_eq!(questions[0].common_instruction.as_ref().unwrap().content, "a");
        assert_eq!(questions[1].common_instruction.as_ref().unwrap().content, "b");
    }

    #[test]
    fn test_text_choices_get_page_tables() {
        let long = "충분히 길게 작성된 선택지 문장입니다";
        let mut questions = vec![question(1, 1, [long, long, long, long])];
        let tables = vec![TableRegion::new(
            1,
            1,
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            grid("t"),
        )];
        let pages: BTreeMap<u32, &LayoutPage> = BTreeMap::new();
        link_tables(&mut questions, &tables, &pages);

        let q = &questions[0];
        assert!(q.has_table);
        assert_eq!(q.choice_type, ChoiceType::Text);
        assert_eq!(q.table_data, Some(vec![grid("t")]));
        assert!(q.choice_tables.is_none());
    }

    #[test]
    fn test_reference_with_too_few_tables_stays_text() {
        let mut questions = vec![question(1, 1, ["[1,2] 참조", "", "", ""])];
        let tables = vec![TableRegion::new(
            1,
            1,
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            grid("t"),
        )];
        let pages: BTreeMap<u32, &LayoutPage> = BTreeMap::new();
        link_tables(&mut questions, &tables, &pages);

        assert_eq!(questions[0].choice_type, ChoiceType::Text);
        assert_eq!(questions[0].choices[0], "[1,2] 참조");
    }

    #[test]
    fn test_questions_on_other_pages_untouched() {
        let mut questions = vec![question(1, 2, ["a", "b", "c", "d"])];
        let tables = vec![TableRegion::new(
            1,
            1,
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            grid("t"),
        )];
        let pages: BTreeMap<u32, &LayoutPage> = BTreeMap::new();
        link_tables(&mut questions, &tables, &pages);

        assert!(!questions[0].has_table);
        assert!(questions[0].table_data.is_none());
    }

    #[test]
    fn test_extract_table_choices_with_symbols() {
        let page = LayoutPage::a4(1)
            .with_text_line(40.0, 80.0, "1. 다음 행렬은?")
            .with_text_line(40.0, 100.0, "①")
            .with_text_line(300.0, 100.0, "②")
            .with_text_line(40.0, 300.0, "③")
            .with_text_line(300.0, 300.0, "④")
            .with_table(BoundingBox::new(310.0, 315.0, 400.0, 360.0), grid("D"))
            .with_table(BoundingBox::new(50.0, 115.0, 150.0, 160.0), grid("A"))
            .with_table(BoundingBox::new(50.0, 315.0, 150.0, 360.0), grid("C"))
            .with_table(BoundingBox::new(310.0, 115.0, 400.0, 160.0), grid("B"));
        let doc = LayoutDocument::new(vec![page]);

        let extraction = ExamExtractor::default().extract(&doc).unwrap();
        let q = &extraction.document.questions[0];

        assert_eq!(q.choice_type, ChoiceType::Table);
        assert!(q.has_table);
        assert_eq!(q.choices[0], "표 참조 (선택지 1)");
        assert_eq!(q.choices[3], "표 참조 (선택지 4)");
        assert_eq!(q.choice_table(0), Some(&grid("A")));
        assert_eq!(q.choice_table(1), Some(&grid("B")));
        assert_eq!(q.choice_table(2), Some(&grid("C")));
        assert_eq!(q.choice_table(3), Some(&grid("D")));
        assert!(q.table_data.is_none());
    }

    #[test]
    fn test_extract_builds_manifest_and_defaults() {
        let page = LayoutPage::a4(1)
            .with_text_line(40.0, 80.0, "1. 질문입니다")
            .with_images(2);
        let doc = LayoutDocument::new(vec![page]);

        let options = ExtractOptions::new().with_image_dir("out/images");
        let extraction = ExamExtractor::new(options).extract(&doc).unwrap();
        let document = &extraction.document;

        assert_eq!(document.year, 2024);
        assert_eq!(document.semester, 2);
        assert_eq!(document.subject, None);
        assert_eq!(document.total_questions, 1);
        assert_eq!(document.images.len(), 2);
        assert_eq!(document.images[1].path, "out/images/page1_img2.png");
        assert_eq!(extraction.pages[0].left_text, "1. 질문입니다");
    }
}
