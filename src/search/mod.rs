//! Search-and-filter query engine for the teacher directory
//!
//! This module turns URL state and free-text input into ordered, paginated
//! result lists:
//!
//! - **Vocabulary**: synonym/misspelling/composite tables resolving raw
//!   tokens to canonical facet values
//! - **Query Parsing**: free text → structured facets + name residue
//! - **Name Matching**: substring/fuzzy scoring, lower-is-better
//! - **Reconciliation**: the URL as the single source of filter truth,
//!   loop-free
//! - **Composition**: roster ⋈ enrichment, conjunctive facet predicate,
//!   combined ranking, dedup, fail-closed
//! - **Pagination**: fixed-size incremental reveal
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              SearchSession                       │
//! ├─────────────────────────────────────────────────┤
//! │  - navigate(url)      - apply_picker()          │
//! │  - load_more()        - visible()/has_more()    │
//! └─────────────────────────────────────────────────┘
//!          │                    │
//!          ▼                    ▼
//! ┌──────────────────┐  ┌─────────────────────────────┐
//! │ FilterReconciler │  │        SearchService         │
//! ├──────────────────┤  ├─────────────────────────────┤
//! │  URL ⇄ FilterState│ │  - generation counter        │
//! │  QueryParser      │ │  - cached roster fetch       │
//! │  write-back guard │ │  - chunked enrichment fetch  │
//! └──────────────────┘  │  - ResultComposer            │
//!                       └─────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tutor_finder::search::{BrowseQuery, SearchConfig, SearchService, SearchSession};
//! use tutor_finder::store::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryStore::new());
//!     let service = Arc::new(SearchService::new(store, SearchConfig::default()));
//!     let mut session = SearchSession::new(service);
//!
//!     let url = BrowseQuery {
//!         q: Some("class 10 maths new town".to_string()),
//!         ..Default::default()
//!     };
//!     session.navigate(&url).await?;
//!     println!("{} teachers visible", session.visible().len());
//!
//!     Ok(())
//! }
//! ```

mod composer;
mod config;
mod error;
mod filter;
mod matcher;
mod pager;
mod parser;
mod reconciler;
mod service;
pub mod vocab;

pub use composer::ResultComposer;
pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{SearchError, SearchResult};
pub use filter::{BrowseQuery, FilterState};
pub use matcher::{NameMatcher, MIN_NAME_LEN};
pub use pager::IncrementalPager;
pub use parser::{ParsedQuery, QueryParser, MIN_QUERY_LEN};
pub use reconciler::{FilterOwner, FilterReconciler, Reconciliation};
pub use service::{SearchOutcome, SearchService, SearchSession};
