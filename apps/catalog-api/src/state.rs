//! Application state management

use domain_products::InMemoryProductRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Record store; clones share the same records
    pub repository: InMemoryProductRepository,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        let repository = InMemoryProductRepository::with_max_records(config.catalog.max_records);
        Self { config, repository }
    }
}
