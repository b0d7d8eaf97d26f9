//! Products API routes

use axum::Router;
use domain_products::{handlers, MongoProductRepository, ProductService};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState, repository: Arc<MongoProductRepository>) -> Router {
    let service = ProductService::from_shared(repository);
    handlers::router(service, state.sessions.clone())
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoProductRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
