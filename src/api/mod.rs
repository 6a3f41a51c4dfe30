pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::{identity::IdentityProvider, search::SearchService, store::DirectoryStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
    pub store: Arc<dyn DirectoryStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        service: Arc<SearchService>,
        store: Arc<dyn DirectoryStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            service,
            store,
            identity,
        }
    }
}
