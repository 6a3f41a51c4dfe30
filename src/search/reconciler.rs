//! Filter-state reconciliation against the URL.
//!
//! The URL query string is the single durable source of truth; the
//! reconciler keeps one in-memory [`FilterState`] derived from it. Every
//! navigation re-runs [`FilterReconciler::reconcile`]; picker interactions
//! go through [`FilterReconciler::apply_picker`], which writes the URL and
//! arms a one-shot guard so the echoed URL-change event cannot start a
//! reconciliation loop.

use parking_lot::Mutex;
use serde::Serialize;
use strum::Display;

use super::filter::{BrowseQuery, FilterState};
use super::parser::QueryParser;

/// Who produced the currently active filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum FilterOwner {
    /// Explicit `filter_*` URL parameters (persisted picker selections).
    UrlExplicit,
    /// Facets parsed out of the free-text `q` parameter.
    QueryDerived,
    /// A picker toggle in the current session, not yet re-read from the URL.
    Picker,
}

/// Write-phase guard. A tagged variant rather than a bare bool so the
/// suppression window is explicit in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WritePhase {
    Idle,
    WritingUrl,
}

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Whether the in-memory state actually changed.
    pub changed: bool,
    /// Owner of the state after this pass.
    pub owner: FilterOwner,
    /// Name residue accompanying a query-derived state.
    pub residue: Option<String>,
}

#[derive(Debug)]
struct Inner {
    filters: FilterState,
    residue: Option<String>,
    owner: FilterOwner,
    phase: WritePhase,
}

/// Reconciles in-memory filter state with the URL on every navigation.
#[derive(Debug)]
pub struct FilterReconciler {
    parser: QueryParser,
    inner: Mutex<Inner>,
}

impl FilterReconciler {
    pub fn new() -> Self {
        Self {
            parser: QueryParser::new(),
            inner: Mutex::new(Inner {
                filters: FilterState::new(),
                residue: None,
                owner: FilterOwner::UrlExplicit,
                phase: WritePhase::Idle,
            }),
        }
    }

    /// Recompute the intended filter state from the URL.
    ///
    /// A `q` of at least two characters REPLACES all facets with the
    /// parser's output; new search text fully supersedes prior advanced
    /// selections. Without `q`, the explicit `filter_*` parameters (plus the
    /// single-value shortcuts) are the state. A pass that lands on an
    /// unchanged state reports `changed: false` and does nothing else, and a
    /// pass arriving inside the self-write window is skipped entirely.
    pub fn reconcile(&self, url: &BrowseQuery) -> Reconciliation {
        let mut inner = self.inner.lock();

        if inner.phase == WritePhase::WritingUrl {
            // Self-inflicted URL change; disarm and skip.
            inner.phase = WritePhase::Idle;
            return Reconciliation {
                changed: false,
                owner: inner.owner,
                residue: inner.residue.clone(),
            };
        }

        let (intended, residue, owner) = match url.search_text() {
            Some(text) => {
                let parsed = self.parser.parse(text);
                (parsed.filters, parsed.residue, FilterOwner::QueryDerived)
            }
            None => {
                let mut filters = FilterState::from_url(url);
                filters.apply_shortcuts(url);
                (filters, None, FilterOwner::UrlExplicit)
            }
        };

        // Order-insensitive comparison: facet sets compare as sets.
        let changed = intended != inner.filters || residue != inner.residue;
        if changed {
            inner.filters = intended;
            inner.residue = residue;
        }
        inner.owner = owner;

        Reconciliation {
            changed,
            owner,
            residue: inner.residue.clone(),
        }
    }

    /// Apply a picker toggle: replace the in-memory state and write it back
    /// into the URL's facet parameters (comma-joined, absent when empty).
    ///
    /// Picker selections replace any active free-text search, so `q` is
    /// cleared from the URL alongside the write. The guard stays armed until
    /// the next [`reconcile`](Self::reconcile) call observes it.
    pub fn apply_picker(&self, new_state: FilterState, url: &mut BrowseQuery) {
        let mut inner = self.inner.lock();
        inner.filters = new_state;
        inner.residue = None;
        inner.owner = FilterOwner::Picker;
        inner.phase = WritePhase::WritingUrl;

        url.q = None;
        inner.filters.write_to_url(url);
    }

    /// Snapshot of the current filter state and residue.
    pub fn snapshot(&self) -> (FilterState, Option<String>) {
        let inner = self.inner.lock();
        (inner.filters.clone(), inner.residue.clone())
    }

    pub fn owner(&self) -> FilterOwner {
        self.inner.lock().owner
    }
}

impl Default for FilterReconciler {
    fn default() -> Self {
        Self::new()
    }
}
