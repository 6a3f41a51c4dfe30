//! End-to-end tests for the search flow over the in-memory store

use async_trait::async_trait;
use tokio_test::assert_ok;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tutor_finder::error::{AppError, Result as AppResult};
use tutor_finder::models::{EnrichmentRecord, TeacherRecord};
use tutor_finder::search::{
    BrowseQuery, FilterState, SearchConfig, SearchError, SearchService, SearchSession,
};
use tutor_finder::store::{DirectoryStore, InMemoryStore};

/// Helper to seed a store with a teacher and a matching enrichment row.
async fn seed_teacher(
    store: &InMemoryStore,
    name: &str,
    slug: &str,
    subjects: &str,
    areas: &str,
    classes: (&str, &str),
) {
    store
        .upsert_teacher(&TeacherRecord::new(name, slug))
        .await
        .unwrap();
    store
        .upsert_enrichment(
            &EnrichmentRecord::new(slug)
                .with_subjects(subjects)
                .with_areas(areas)
                .with_classes(classes.0, classes.1)
                .with_boards("CBSE")
                .with_mode("Offline"),
        )
        .await
        .unwrap();
}

async fn demo_store() -> Arc<InMemoryStore> {
    let store = InMemoryStore::new();
    seed_teacher(&store, "Aparna", "aparna", "Physics", "Salt Lake", ("Class 11, Class 12", "11,12")).await;
    seed_teacher(&store, "Bina", "bina", "Chemistry", "New Town", ("Class 11, Class 12", "11,12")).await;
    seed_teacher(&store, "Aparna Roy", "aparna-roy", "Chemistry", "Garia", ("Class 12", "12")).await;
    seed_teacher(&store, "Chitra Bose", "chitra-bose", "Maths", "New Town", ("Class 5", "5")).await;
    Arc::new(store)
}

fn url(q: &str) -> BrowseQuery {
    BrowseQuery {
        q: Some(q.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_free_text_is_order_independent_around_stop_words() {
    let service = Arc::new(SearchService::new(demo_store().await, SearchConfig::default()));

    let mut first = SearchSession::new(service.clone());
    first
        .navigate(&url("looking for a maths teacher in new town"))
        .await
        .unwrap();

    let mut second = SearchSession::new(service);
    second.navigate(&url("new town maths teacher")).await.unwrap();

    let names = |session: &SearchSession| -> Vec<String> {
        session.visible().iter().map(|l| l.name().to_string()).collect()
    };

    assert_eq!(names(&first), vec!["Chitra Bose".to_string()]);
    assert_eq!(names(&first), names(&second));
}

#[tokio::test]
async fn test_address_numbers_do_not_become_class_filters() {
    let service = Arc::new(SearchService::new(demo_store().await, SearchConfig::default()));

    // "flat 5 sector 3" carries no recognizable facet and no name residue:
    // the whole roster comes back rather than a class-5/class-3 filter.
    let mut session = SearchSession::new(service.clone());
    session.navigate(&url("flat 5 sector 3")).await.unwrap();
    assert_eq!(session.total(), 4);

    // "class 5" is a real class filter and matches only the class-5 teacher.
    let mut session = SearchSession::new(service);
    session.navigate(&url("class 5")).await.unwrap();
    let names: Vec<&str> = session.visible().iter().map(|l| l.name()).collect();
    assert_eq!(names, vec!["Chitra Bose"]);
}

#[tokio::test]
async fn test_combined_name_and_filter_rank() {
    let service = Arc::new(SearchService::new(demo_store().await, SearchConfig::default()));

    let mut session = SearchSession::new(service);
    session.navigate(&url("aparna chemistry")).await.unwrap();

    let names: Vec<&str> = session.visible().iter().map(|l| l.name()).collect();

    // Every Chemistry teacher is present; the name match leads; the
    // Physics-only "Aparna" is excluded by the subject filter.
    assert_eq!(names, vec!["Aparna Roy", "Bina"]);
}

#[tokio::test]
async fn test_pure_name_search_empty_result_stays_empty() {
    let service = Arc::new(SearchService::new(demo_store().await, SearchConfig::default()));

    let mut session = SearchSession::new(service);
    tokio_test::assert_ok!(session.navigate(&url("ramendra")).await);

    assert_eq!(session.total(), 0);
    assert!(!session.has_more());
}

/// Store whose enrichment table always errors.
struct BrokenEnrichmentStore {
    inner: InMemoryStore,
}

#[async_trait]
impl DirectoryStore for BrokenEnrichmentStore {
    async fn fetch_roster(&self, limit: usize) -> AppResult<Vec<TeacherRecord>> {
        self.inner.fetch_roster(limit).await
    }

    async fn fetch_enrichment(&self, _slugs: &[String]) -> AppResult<Vec<EnrichmentRecord>> {
        Err(AppError::Database("enrichment table unavailable".to_string()))
    }

    async fn get_teacher(&self, slug: &str) -> AppResult<Option<TeacherRecord>> {
        self.inner.get_teacher(slug).await
    }

    async fn get_enrichment(&self, slug: &str) -> AppResult<Option<EnrichmentRecord>> {
        self.inner.get_enrichment(slug).await
    }

    async fn upsert_teacher(&self, record: &TeacherRecord) -> AppResult<()> {
        self.inner.upsert_teacher(record).await
    }

    async fn upsert_enrichment(&self, record: &EnrichmentRecord) -> AppResult<()> {
        self.inner.upsert_enrichment(record).await
    }
}

#[tokio::test]
async fn test_fail_closed_when_enrichment_fetch_errors() {
    let inner = InMemoryStore::new();
    inner
        .upsert_teacher(&TeacherRecord::new("Aparna Roy", "aparna-roy"))
        .await
        .unwrap();
    let store = Arc::new(BrokenEnrichmentStore { inner });

    let service = SearchService::new(store, SearchConfig::default());

    // Filtered query with a dead enrichment table: empty, never unfiltered.
    let mut filters = FilterState::new();
    filters
        .subjects
        .insert(tutor_finder::models::Subject::Chemistry);
    let outcome = service.execute(&filters, None).await.unwrap();
    assert!(outcome.listings.is_empty());

    // The unfiltered path still serves the (un-enriched) roster.
    let outcome = service.execute(&FilterState::new(), None).await.unwrap();
    assert_eq!(outcome.listings.len(), 1);
}

/// Store that delays the first roster fetch, simulating a slow early
/// request racing a fast later one.
struct SlowFirstStore {
    inner: InMemoryStore,
    delay_armed: AtomicBool,
}

#[async_trait]
impl DirectoryStore for SlowFirstStore {
    async fn fetch_roster(&self, limit: usize) -> AppResult<Vec<TeacherRecord>> {
        if self.delay_armed.swap(false, Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(80)).await;
        }
        self.inner.fetch_roster(limit).await
    }

    async fn fetch_enrichment(&self, slugs: &[String]) -> AppResult<Vec<EnrichmentRecord>> {
        self.inner.fetch_enrichment(slugs).await
    }

    async fn get_teacher(&self, slug: &str) -> AppResult<Option<TeacherRecord>> {
        self.inner.get_teacher(slug).await
    }

    async fn get_enrichment(&self, slug: &str) -> AppResult<Option<EnrichmentRecord>> {
        self.inner.get_enrichment(slug).await
    }

    async fn upsert_teacher(&self, record: &TeacherRecord) -> AppResult<()> {
        self.inner.upsert_teacher(record).await
    }

    async fn upsert_enrichment(&self, record: &EnrichmentRecord) -> AppResult<()> {
        self.inner.upsert_enrichment(record).await
    }
}

#[tokio::test]
async fn test_stale_generation_is_discarded() {
    let inner = InMemoryStore::new();
    inner
        .upsert_teacher(&TeacherRecord::new("Aparna Roy", "aparna-roy"))
        .await
        .unwrap();
    let store = Arc::new(SlowFirstStore {
        inner,
        delay_armed: AtomicBool::new(true),
    });

    let service = Arc::new(SearchService::new(store, SearchConfig::default()));

    let slow = {
        let service = service.clone();
        tokio::spawn(async move { service.execute(&FilterState::new(), None).await })
    };
    // Let the slow request reach its store call before racing past it.
    tokio::time::sleep(Duration::from_millis(10)).await;
    let fast = service.execute(&FilterState::new(), None).await;

    assert!(fast.is_ok());
    let slow = slow.await.unwrap();
    assert!(matches!(slow, Err(SearchError::Superseded { .. })));
}

#[tokio::test]
async fn test_missing_enrichment_row_excluded_from_filtered_results() {
    let store = InMemoryStore::new();
    // Enriched teacher and a roster-only teacher.
    seed_teacher(&store, "Bina", "bina", "Chemistry", "New Town", ("Class 12", "12")).await;
    store
        .upsert_teacher(&TeacherRecord::new("Dipak Sen", "dipak-sen"))
        .await
        .unwrap();

    let service = SearchService::new(Arc::new(store), SearchConfig::default());

    let mut filters = FilterState::new();
    filters
        .subjects
        .insert(tutor_finder::models::Subject::Chemistry);
    let outcome = service.execute(&filters, None).await.unwrap();

    let names: Vec<&str> = outcome.listings.iter().map(|l| l.name()).collect();
    assert_eq!(names, vec!["Bina"]);

    // Unfiltered browsing still shows the roster-only teacher.
    let outcome = service.execute(&FilterState::new(), None).await.unwrap();
    assert_eq!(outcome.listings.len(), 2);
}
