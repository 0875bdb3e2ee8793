//! Extraction options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::source::TableSettings;

/// Options for reconstructing an exam document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode for per-page and per-table faults
    pub error_mode: ErrorMode,

    /// Page selection (which pages to process)
    pub pages: PageSelection,

    /// Settings handed to the extractor's table detection
    pub table_settings: TableSettings,

    /// Year reported when the header table does not print one
    pub default_year: i32,

    /// Semester reported when the header table does not print one
    pub default_semester: u32,

    /// Keywords identifying the subject row of the header table
    pub subject_keywords: Vec<String>,

    /// Directory prefix for image manifest paths
    pub image_dir: String,

    /// Normalize page text to Unicode NFC before parsing
    pub normalize_unicode: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip faulty pages and tables (the default).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Fail on the first page or table fault.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set table detection settings.
    pub fn with_table_settings(mut self, settings: TableSettings) -> Self {
        self.table_settings = settings;
        self
    }

    /// Set the fallback year and semester.
    pub fn with_term(mut self, year: i32, semester: u32) -> Self {
        self.default_year = year;
        self.default_semester = semester;
        self
    }

    /// Set the subject row keywords.
    pub fn with_subject_keywords<S: Into<String>>(
        mut self,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        self.subject_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the image manifest directory.
    pub fn with_image_dir(mut self, dir: impl Into<String>) -> Self {
        self.image_dir = dir.into();
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            pages: PageSelection::All,
            table_settings: TableSettings::default(),
            default_year: 2024,
            default_semester: 2,
            subject_keywords: vec!["컴퓨팅".to_string()],
            image_dir: "images".to_string(),
            normalize_unicode: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page or table fault
    Strict,
    /// Log the fault, skip the page or table, and continue
    #[default]
    Lenient,
}

/// Page selection for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Process all pages
    #[default]
    All,
    /// Process a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Process specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let invalid = || Error::InvalidPageRange(s.to_string());

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| invalid())?;
                let end: u32 = end.trim().parse().map_err(|_| invalid())?;
                if start > end {
                    return Err(invalid());
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| invalid())?;
                let end: u32 = end.trim().parse().map_err(|_| invalid())?;
                for p in start..=end {
                    if !pages.contains(&p) {
                        pages.push(p);
                    }
                }
            } else {
                let p: u32 = part.parse().map_err(|_| invalid())?;
                if !pages.contains(&p) {
                    pages.push(p);
                }
            }
        }

        pages.sort_unstable();
        Ok(PageSelection::Pages(pages))
    }
}
