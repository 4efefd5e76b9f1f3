//! Products Domain
//!
//! Product catalog backed by an in-memory record store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, listing pipeline, response shaping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Record store (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, DTOs, public projections
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = InMemoryProductRepository::with_max_records(10_000);
//! let service = ProductService::new(repository);
//! service.seed_demo_catalog(chrono::Utc::now()).await?;
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod repository;
pub mod seed;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, ListQuery, ListQueryParams, ProductDetail, ProductListItem, ProductListResult,
    ProductRecord, SortOption, UpdateProduct, ViewMode,
};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
