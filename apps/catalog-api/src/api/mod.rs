//! API routes module

pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/product", products::router(state))
}

/// Load startup data
pub async fn init_data(state: &AppState) -> eyre::Result<()> {
    products::seed(state).await
}
