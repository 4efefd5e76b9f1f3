//! Products API routes

use axum::Router;
use chrono::Utc;
use domain_products::{handlers, ProductService};
use tracing::info;

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let service = ProductService::new(state.repository.clone());
    handlers::router(service)
}

/// Seed the demo catalog unless disabled
pub async fn seed(state: &AppState) -> eyre::Result<()> {
    if !state.config.catalog.seed {
        info!("CATALOG_SEED disabled, starting with an empty catalog");
        return Ok(());
    }

    let service = ProductService::new(state.repository.clone());
    let count = service.seed_demo_catalog(Utc::now()).await?;
    info!(count, "Demo catalog loaded");
    Ok(())
}
