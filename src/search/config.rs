//! Search tuning configuration

use serde::{Deserialize, Serialize};

/// Search engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on the roster fetch (records)
    pub roster_limit: usize,

    /// Enrichment rows fetched per chunk
    pub chunk_size: usize,

    /// Incremental page size
    pub page_size: usize,

    /// Maximum edit distance for the fuzzy name-match tier
    pub max_edit_distance: u32,

    /// Cache capacity (entries) shared by roster and enrichment caches
    pub cache_capacity: u64,

    /// TTL for the cached roster fetch, seconds
    pub roster_ttl_secs: u64,

    /// TTL for cached enrichment chunks, seconds
    pub enrichment_ttl_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            roster_limit: 200,
            chunk_size: 50,
            page_size: 20,
            max_edit_distance: 2,
            cache_capacity: 1_000,
            roster_ttl_secs: 300,
            enrichment_ttl_secs: 600,
        }
    }
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn roster_limit(mut self, limit: usize) -> Self {
        self.config.roster_limit = limit;
        self
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size.max(1);
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.config.page_size = size.max(1);
        self
    }

    pub fn max_edit_distance(mut self, distance: u32) -> Self {
        self.config.max_edit_distance = distance;
        self
    }

    pub fn cache_capacity(mut self, capacity: u64) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    pub fn roster_ttl_secs(mut self, secs: u64) -> Self {
        self.config.roster_ttl_secs = secs;
        self
    }

    pub fn enrichment_ttl_secs(mut self, secs: u64) -> Self {
        self.config.enrichment_ttl_secs = secs;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
