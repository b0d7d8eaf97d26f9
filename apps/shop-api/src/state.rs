//! Application state management

use axum_helpers::SessionManager;
use mongodb::{Client, Database};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub db: Database,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(&config.mongodb.database);
        let sessions = SessionManager::new(&config.session, config.environment.use_https());

        Self {
            config,
            mongo_client,
            db,
            sessions,
        }
    }
}
