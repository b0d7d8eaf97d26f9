//! Users Domain
//!
//! Credential storage and the auth workflow: registration, login and
//! logout over a signed session cookie.
//!
//! # Features
//!
//! - Registration with Argon2 password hashing
//! - First registered account becomes `admin` (best-effort)
//! - Login with a single, non-revealing failure for bad email or password
//! - Stateless logout via an expired cookie
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, session cookie
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, role assignment, password checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory + MongoDB)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{SessionConfig, SessionManager};
//! use domain_users::{handlers, AuthService, InMemoryUserRepository};
//!
//! let service = AuthService::new(InMemoryUserRepository::new());
//! let sessions = SessionManager::new(
//!     &SessionConfig::new("a-very-long-secret-used-only-for-docs!!"),
//!     false,
//! );
//!
//! let router = handlers::router(service, sessions);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{AuthResponse, LoginRequest, LogoutResponse, RegisterRequest, User};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::AuthService;
