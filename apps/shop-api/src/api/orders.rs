//! Orders API routes

use axum::Router;
use domain_orders::{handlers, FakePaymentGateway, MongoOrderRepository, OrderService};
use domain_products::MongoProductRepository;
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState, products: Arc<MongoProductRepository>) -> Router {
    let service = OrderService::new(
        MongoOrderRepository::new(&state.db),
        products,
        FakePaymentGateway::new(),
    );
    handlers::router(service, state.sessions.clone())
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoOrderRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
