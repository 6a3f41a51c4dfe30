use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::enrichment::EnrichmentRecord;

/// A lightweight reference to a teacher's primary subject (name + slug).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectRef {
    pub name: String,
    pub slug: String,
}

/// A teacher as it appears in the primary roster table.
///
/// Roster rows are created and updated by data entry outside this service;
/// the search core only reads them. Rich filterable attributes live in the
/// enrichment table, joined by `slug`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TeacherRecord {
    /// Unique identifier
    pub id: Uuid,

    /// Human name
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// URL slug; unique, stable, the join key to the enrichment table
    #[validate(length(min = 1, max = 255))]
    pub slug: String,

    /// Profile image reference
    pub photo_url: Option<String>,

    /// Short bio shown on cards
    pub bio: String,

    /// Primary location display text
    pub location: String,

    /// Primary subject shown on cards
    pub primary_subject: Option<SubjectRef>,

    /// Featured teachers sort ahead of the rest of the roster
    pub featured: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TeacherRecord {
    /// Create a new roster record.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
            photo_url: None,
            bio: String::new(),
            location: String::new(),
            primary_subject: None,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_primary_subject(mut self, name: impl Into<String>, slug: impl Into<String>) -> Self {
        self.primary_subject = Some(SubjectRef {
            name: name.into(),
            slug: slug.into(),
        });
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }
}

/// The joined view of a roster record and its enrichment record.
///
/// This is the only shape handed past the composer: downstream code (ranking,
/// pagination, the API layer) never sees raw unjoined rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherListing {
    pub record: TeacherRecord,
    pub enrichment: Option<EnrichmentRecord>,
}

impl TeacherListing {
    pub fn new(record: TeacherRecord, enrichment: Option<EnrichmentRecord>) -> Self {
        Self { record, enrichment }
    }

    pub fn id(&self) -> Uuid {
        self.record.id
    }

    pub fn slug(&self) -> &str {
        &self.record.slug
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Whether this listing can participate in facet filtering at all.
    pub fn is_enriched(&self) -> bool {
        self.enrichment.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_record_builder() {
        let record = TeacherRecord::new("Aparna Sen", "aparna-sen")
            .with_location("Salt Lake, Kolkata")
            .with_primary_subject("Physics", "physics")
            .with_featured(true);

        assert_eq!(record.name, "Aparna Sen");
        assert_eq!(record.slug, "aparna-sen");
        assert!(record.featured);
        assert_eq!(record.primary_subject.as_ref().unwrap().name, "Physics");
    }

    #[test]
    fn test_listing_without_enrichment() {
        let record = TeacherRecord::new("Bina Das", "bina-das");
        let listing = TeacherListing::new(record, None);

        assert!(!listing.is_enriched());
        assert_eq!(listing.name(), "Bina Das");
    }
}
