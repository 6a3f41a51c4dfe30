//! Search orchestration: fetching, caching, staleness, composition.
//!
//! [`SearchService`] owns the store handle, the read-through caches and the
//! request-generation counter. [`SearchSession`] bundles a service with a
//! reconciler and a pager, modelling one browse surface (one URL) end to
//! end.

use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::composer::ResultComposer;
use super::config::SearchConfig;
use super::error::{SearchError, SearchResult};
use super::filter::{BrowseQuery, FilterState};
use super::matcher::NameMatcher;
use super::pager::IncrementalPager;
use super::reconciler::FilterReconciler;
use crate::models::{EnrichmentRecord, TeacherListing, TeacherRecord};
use crate::state::AppCache;
use crate::store::DirectoryStore;

/// The composed result of one search execution.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Generation this execution ran under.
    pub generation: u64,
    /// The ordered, deduplicated candidate list.
    pub listings: Vec<TeacherListing>,
}

/// Orchestrates roster + enrichment fetches into composed result lists.
pub struct SearchService {
    store: Arc<dyn DirectoryStore>,
    roster_cache: AppCache<String, Vec<TeacherRecord>>,
    enrichment_cache: AppCache<String, Vec<EnrichmentRecord>>,
    composer: ResultComposer,
    config: SearchConfig,
    generation: AtomicU64,
}

impl SearchService {
    pub fn new(store: Arc<dyn DirectoryStore>, config: SearchConfig) -> Self {
        let matcher = NameMatcher::new(config.max_edit_distance);
        Self {
            store,
            roster_cache: AppCache::new(config.cache_capacity),
            enrichment_cache: AppCache::new(config.cache_capacity),
            composer: ResultComposer::new(matcher),
            config,
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Execute a search for an already-reconciled filter state and residue.
    ///
    /// Each call starts a new generation; a call that is still in flight
    /// when a newer one begins resolves to [`SearchError::Superseded`] and
    /// its results must be discarded by the caller.
    pub async fn execute(
        &self,
        filters: &FilterState,
        residue: Option<&str>,
    ) -> SearchResult<SearchOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let roster = self.fetch_roster().await?;
        let slugs: Vec<String> = roster.iter().map(|record| record.slug.clone()).collect();
        let (enrichment, enrichment_loaded) = self.fetch_enrichment(&slugs).await;

        // Stale-response rule: anything behind the current generation is
        // dropped, so a slow early request can never overwrite a later one.
        let current = self.current_generation();
        if generation < current {
            return Err(SearchError::Superseded {
                stale: generation,
                current,
            });
        }

        let listings = ResultComposer::join(roster, enrichment);
        let composed = self
            .composer
            .compose(listings, filters, residue, enrichment_loaded);

        tracing::debug!(
            generation,
            results = composed.len(),
            filtered = !filters.is_empty(),
            "Search composed"
        );

        Ok(SearchOutcome {
            generation,
            listings: composed,
        })
    }

    async fn fetch_roster(&self) -> SearchResult<Vec<TeacherRecord>> {
        let limit = self.config.roster_limit;
        let key = format!("roster:{}", limit);
        let ttl = Duration::from_secs(self.config.roster_ttl_secs);
        let store = self.store.clone();

        self.roster_cache
            .get_or_load(key, ttl, || async move {
                store
                    .fetch_roster(limit)
                    .await
                    .map_err(|e| SearchError::Store(e.to_string()))
            })
            .await
    }

    /// Fetch enrichment rows for the given slugs in concurrent bounded
    /// chunks. Failed chunks are logged and skipped; the second return value
    /// is false only when every chunk failed (nothing loaded at all).
    async fn fetch_enrichment(&self, slugs: &[String]) -> (Vec<EnrichmentRecord>, bool) {
        if slugs.is_empty() {
            return (Vec::new(), true);
        }

        let ttl = Duration::from_secs(self.config.enrichment_ttl_secs);
        let chunk_size = self.config.chunk_size.max(1);
        let fetches = slugs.chunks(chunk_size).map(|chunk| {
            let chunk: Vec<String> = chunk.to_vec();
            let key = chunk_cache_key(&chunk);
            let store = self.store.clone();
            let cache = self.enrichment_cache.clone();

            async move {
                cache
                    .get_or_load(key, ttl, || async move {
                        store
                            .fetch_enrichment(&chunk)
                            .await
                            .map_err(|e| SearchError::Store(e.to_string()))
                    })
                    .await
            }
        });

        let settled = futures::future::join_all(fetches).await;

        let total = settled.len();
        let mut rows = Vec::new();
        let mut failed = 0usize;
        for outcome in settled {
            match outcome {
                Ok(chunk_rows) => rows.extend(chunk_rows),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(error = %e, "Enrichment chunk fetch failed; skipping");
                }
            }
        }

        (rows, failed < total)
    }
}

/// Cache key for an enrichment chunk: digest of the sorted slug set, so the
/// same chunk contents hit the same entry regardless of slug order.
fn chunk_cache_key(slugs: &[String]) -> String {
    let mut sorted: Vec<&str> = slugs.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    for slug in sorted {
        hasher.update(slug.as_bytes());
        hasher.update(b"\n");
    }
    format!("enrichment:{:x}", hasher.finalize())
}

/// One browse surface: reconciler + service + pager wired together.
///
/// `navigate` is the single entry point for URL changes (typed queries,
/// picker-driven rewrites, back/forward); `load_more` is the intersection
/// trigger. Results from a superseded execution are dropped and the
/// previously composed list stays in place.
pub struct SearchSession {
    service: Arc<SearchService>,
    reconciler: FilterReconciler,
    pager: IncrementalPager,
    loaded: bool,
}

impl SearchSession {
    pub fn new(service: Arc<SearchService>) -> Self {
        let page_size = service.config().page_size;
        Self {
            service,
            reconciler: FilterReconciler::new(),
            pager: IncrementalPager::new(page_size),
            loaded: false,
        }
    }

    /// Handle a navigation event. Re-executes the search only when the
    /// reconciled state actually changed (or nothing is loaded yet); the
    /// pager resets with every new composed list and reveals its first page.
    pub async fn navigate(&mut self, url: &BrowseQuery) -> SearchResult<()> {
        let outcome = self.reconciler.reconcile(url);
        if self.loaded && !outcome.changed {
            return Ok(());
        }

        let (filters, residue) = self.reconciler.snapshot();
        match self.service.execute(&filters, residue.as_deref()).await {
            Ok(result) => {
                self.pager.set_list(result.listings);
                self.pager.load_more();
                self.loaded = true;
                Ok(())
            }
            Err(SearchError::Superseded { stale, current }) => {
                tracing::debug!(stale, current, "Dropping superseded search result");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply a picker toggle: rewrites `url` in place and re-runs the search
    /// under the new state. The echoed reconciliation is a guarded no-op.
    pub async fn apply_picker(
        &mut self,
        state: FilterState,
        url: &mut BrowseQuery,
    ) -> SearchResult<()> {
        self.reconciler.apply_picker(state, url);

        let (filters, residue) = self.reconciler.snapshot();
        match self.service.execute(&filters, residue.as_deref()).await {
            Ok(result) => {
                self.pager.set_list(result.listings);
                self.pager.load_more();
                self.loaded = true;
                Ok(())
            }
            Err(SearchError::Superseded { stale, current }) => {
                tracing::debug!(stale, current, "Dropping superseded picker result");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// The intersection trigger: reveal the next page.
    pub fn load_more(&mut self) -> usize {
        self.pager.load_more()
    }

    pub fn visible(&self) -> &[TeacherListing] {
        self.pager.visible()
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more()
    }

    pub fn total(&self) -> usize {
        self.pager.total()
    }

    pub fn reconciler(&self) -> &FilterReconciler {
        &self.reconciler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn seeded_store() -> Arc<InMemoryStore> {
        let store = InMemoryStore::new();
        futures::executor::block_on(async {
            for (name, slug, subjects) in [
                ("Aparna Roy", "aparna-roy", "Chemistry"),
                ("Bina Das", "bina-das", "Physics"),
                ("Chitra Bose", "chitra-bose", "Maths"),
            ] {
                store
                    .upsert_teacher(&TeacherRecord::new(name, slug))
                    .await
                    .unwrap();
                store
                    .upsert_enrichment(&EnrichmentRecord::new(slug).with_subjects(subjects))
                    .await
                    .unwrap();
            }
        });
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_execute_unfiltered_returns_capped_roster() {
        let service = SearchService::new(seeded_store(), SearchConfig::default());

        let outcome = service.execute(&FilterState::new(), None).await.unwrap();
        assert_eq!(outcome.listings.len(), 3);
        assert!(outcome.listings.iter().all(|l| l.is_enriched()));
    }

    #[tokio::test]
    async fn test_execute_generations_increase() {
        let service = SearchService::new(seeded_store(), SearchConfig::default());

        let first = service.execute(&FilterState::new(), None).await.unwrap();
        let second = service.execute(&FilterState::new(), None).await.unwrap();
        assert!(second.generation > first.generation);
    }

    #[tokio::test]
    async fn test_chunk_cache_key_is_order_insensitive() {
        let a = chunk_cache_key(&["x".to_string(), "y".to_string()]);
        let b = chunk_cache_key(&["y".to_string(), "x".to_string()]);
        let c = chunk_cache_key(&["z".to_string()]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_session_navigate_and_page() {
        let service = Arc::new(SearchService::new(seeded_store(), SearchConfig::default()));
        let mut session = SearchSession::new(service);

        session.navigate(&BrowseQuery::default()).await.unwrap();
        assert_eq!(session.visible().len(), 3);
        assert!(!session.has_more());
    }
}
