//! MongoDB connection management and driver helpers.

mod config;
mod connector;
mod health;
mod ids;

pub use config::MongoConfig;
pub use connector::{
    client_options, connect_from_config, connect_from_config_with_retry, is_duplicate_key_error,
};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use ids::uuid_to_bson;

pub use mongodb::{Client, Collection, Database};
