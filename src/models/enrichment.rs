use serde::{Deserialize, Serialize};
use validator::Validate;

/// The enrichment table row for a teacher, keyed by the roster slug.
///
/// This table is the authoritative source of filterable attributes. The list
/// columns are stored comma-joined, mirroring the upstream data-entry sheets;
/// the composer splits them at match time. A teacher with no enrichment row
/// cannot pass any facet check (fail-closed).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnrichmentRecord {
    /// Join key; equals the roster record's slug
    #[validate(length(min = 1, max = 255))]
    pub slug: String,

    /// Honorific shown with the name ("Dr.", "Prof.")
    pub title: Option<String>,

    /// Full subject list, comma-joined display form ("Physics, Chemistry")
    pub subjects: String,

    /// Classes taught, comma-joined human form ("Class 9, Class 10")
    pub classes_display: String,

    /// Classes taught, comma-joined normalized numeric form ("9,10")
    pub classes_numeric: String,

    /// Free-text location as entered
    pub location: String,

    /// Areas for filtering, comma-joined; falls back to `location` when empty
    pub filter_areas: String,

    /// Boards catered to, comma-joined ("CBSE, ICSE")
    pub boards: String,

    /// Batch size category ("Group", "Solo", or both comma-joined)
    pub class_size: String,

    /// Teaching mode ("Online", "Offline", or both comma-joined)
    pub mode: String,
}

impl EnrichmentRecord {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: None,
            subjects: String::new(),
            classes_display: String::new(),
            classes_numeric: String::new(),
            location: String::new(),
            filter_areas: String::new(),
            boards: String::new(),
            class_size: String::new(),
            mode: String::new(),
        }
    }

    pub fn with_subjects(mut self, subjects: impl Into<String>) -> Self {
        self.subjects = subjects.into();
        self
    }

    pub fn with_classes(
        mut self,
        display: impl Into<String>,
        numeric: impl Into<String>,
    ) -> Self {
        self.classes_display = display.into();
        self.classes_numeric = numeric.into();
        self
    }

    pub fn with_areas(mut self, filter_areas: impl Into<String>) -> Self {
        self.filter_areas = filter_areas.into();
        self
    }

    pub fn with_boards(mut self, boards: impl Into<String>) -> Self {
        self.boards = boards.into();
        self
    }

    pub fn with_class_size(mut self, class_size: impl Into<String>) -> Self {
        self.class_size = class_size.into();
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// The area text the composer filters against.
    pub fn area_text(&self) -> &str {
        if self.filter_areas.trim().is_empty() {
            &self.location
        } else {
            &self.filter_areas
        }
    }
}
