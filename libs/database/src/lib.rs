//! Database library providing MongoDB connection management and shared
//! connection utilities.
//!
//! # Features
//!
//! - `mongodb` - MongoDB connector, health checks, error and filter helpers
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//! - `all` - Everything above
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(&config.database);
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
