//! Configuration for the shop API

use axum_helpers::SessionConfig;
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name("shop-api");
        }
        let server = ServerConfig::from_env()?;
        let session = SessionConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            session,
            environment,
        })
    }
}
