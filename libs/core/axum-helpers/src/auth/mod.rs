//! Cookie-based session authentication.
//!
//! This module provides:
//! - HS256 session tokens carrying a [`SessionUser`] (id, name, role)
//! - `Set-Cookie` rendering for login and logout
//! - the [`AuthUser`] extractor for protected handlers
//! - [`authorize_roles`] for role-restricted routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{AuthUser, SessionConfig, SessionManager};
//! use core_config::FromEnv;
//!
//! let config = SessionConfig::from_env()?;
//! let sessions = SessionManager::new(&config, environment.use_https());
//!
//! async fn handler(AuthUser(user): AuthUser) -> String {
//!     user.name
//! }
//! ```

pub mod config;
pub mod extractor;
pub mod session;

pub use config::{DEFAULT_SESSION_TTL_SECS, SessionConfig};
pub use extractor::{AuthUser, authorize_roles, extract_token};
pub use session::{Role, SESSION_COOKIE, SessionClaims, SessionManager, SessionUser};
