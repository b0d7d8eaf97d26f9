//! API routes module

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;
use domain_products::MongoProductRepository;
use std::sync::Arc;

use crate::state::AppState;

/// Create all API routes
///
/// The catalog repository is shared by the products routes and the order
/// workflow.
pub fn routes(state: &AppState) -> Router {
    let catalog = Arc::new(MongoProductRepository::new(&state.db));

    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/products", products::router(state, Arc::clone(&catalog)))
        .nest("/orders", orders::router(state, catalog))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    auth::init_indexes(state).await?;
    products::init_indexes(state).await?;
    orders::init_indexes(state).await?;
    Ok(())
}
