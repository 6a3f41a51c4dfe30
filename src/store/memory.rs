use crate::error::{AppError, Result};
use crate::models::{EnrichmentRecord, TeacherRecord};
use crate::store::DirectoryStore;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// In-memory directory store (for the standalone server and testing).
#[derive(Clone, Default)]
pub struct InMemoryStore {
    teachers: Arc<DashMap<String, TeacherRecord>>,
    enrichment: Arc<DashMap<String, EnrichmentRecord>>,
}

/// Shape of the JSON seed fixture.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    teachers: Vec<TeacherRecord>,
    #[serde(default)]
    enrichment: Vec<EnrichmentRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated from a JSON seed file.
    pub fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let seed: SeedFile = serde_json::from_str(&raw)?;

        let store = Self::new();
        for teacher in seed.teachers {
            store.teachers.insert(teacher.slug.clone(), teacher);
        }
        for record in seed.enrichment {
            store.enrichment.insert(record.slug.clone(), record);
        }

        tracing::info!(
            teachers = store.teachers.len(),
            enrichment = store.enrichment.len(),
            "Seed data loaded"
        );
        Ok(store)
    }

    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }
}

#[async_trait]
impl DirectoryStore for InMemoryStore {
    async fn fetch_roster(&self, limit: usize) -> Result<Vec<TeacherRecord>> {
        let mut roster: Vec<TeacherRecord> = self
            .teachers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        // Featured first, then alphabetical by name.
        roster.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        roster.truncate(limit);

        tracing::debug!(rows = roster.len(), "Roster fetched");
        Ok(roster)
    }

    async fn fetch_enrichment(&self, slugs: &[String]) -> Result<Vec<EnrichmentRecord>> {
        Ok(slugs
            .iter()
            .filter_map(|slug| self.enrichment.get(slug).map(|entry| entry.clone()))
            .collect())
    }

    async fn get_teacher(&self, slug: &str) -> Result<Option<TeacherRecord>> {
        Ok(self.teachers.get(slug).map(|entry| entry.clone()))
    }

    async fn get_enrichment(&self, slug: &str) -> Result<Option<EnrichmentRecord>> {
        Ok(self.enrichment.get(slug).map(|entry| entry.clone()))
    }

    async fn upsert_teacher(&self, record: &TeacherRecord) -> Result<()> {
        if record.slug.is_empty() {
            return Err(AppError::Validation("teacher slug must not be empty".to_string()));
        }
        self.teachers.insert(record.slug.clone(), record.clone());
        tracing::debug!(slug = %record.slug, "Teacher saved");
        Ok(())
    }

    async fn upsert_enrichment(&self, record: &EnrichmentRecord) -> Result<()> {
        if record.slug.is_empty() {
            return Err(AppError::Validation("enrichment slug must not be empty".to_string()));
        }
        self.enrichment.insert(record.slug.clone(), record.clone());
        tracing::debug!(slug = %record.slug, "Enrichment saved");
        Ok(())
    }
}
