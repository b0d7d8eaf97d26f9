//! Auth API routes

use axum::Router;
use domain_users::{handlers, AuthService, MongoUserRepository};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = AuthService::new(MongoUserRepository::new(&state.db));
    handlers::router(service, state.sessions.clone())
}

/// Unique email index
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoUserRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
