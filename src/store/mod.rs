pub mod memory;

pub use memory::InMemoryStore;

use crate::error::Result;
use crate::models::{EnrichmentRecord, TeacherRecord};
use async_trait::async_trait;

/// Table-scoped read access to the two logical tables behind the directory:
/// the primary teacher roster and the slug-keyed enrichment table.
///
/// No server-side join is assumed; the application joins by slug. Writes
/// exist only for seeding and administration; the search core never calls
/// them.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Fetch up to `limit` roster rows, featured teachers first, then
    /// alphabetical by name.
    async fn fetch_roster(&self, limit: usize) -> Result<Vec<TeacherRecord>>;

    /// Fetch enrichment rows for the given slugs. Slugs with no row are
    /// simply absent from the result.
    async fn fetch_enrichment(&self, slugs: &[String]) -> Result<Vec<EnrichmentRecord>>;

    /// Look up a single roster row by slug.
    async fn get_teacher(&self, slug: &str) -> Result<Option<TeacherRecord>>;

    /// Look up a single enrichment row by slug.
    async fn get_enrichment(&self, slug: &str) -> Result<Option<EnrichmentRecord>>;

    /// Insert or replace a roster row.
    async fn upsert_teacher(&self, record: &TeacherRecord) -> Result<()>;

    /// Insert or replace an enrichment row.
    async fn upsert_enrichment(&self, record: &EnrichmentRecord) -> Result<()>;
}
