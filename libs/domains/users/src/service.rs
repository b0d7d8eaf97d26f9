use axum_helpers::{Role, SessionUser};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, RegisterRequest, User, normalize_email};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;

/// Registration and login.
///
/// Issuing the session cookie is left to the HTTP layer; the service only
/// decides *who* the caller is.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new account.
    ///
    /// The very first account becomes `admin`. The count-then-insert is not
    /// atomic, so two simultaneous first registrations may both be admins.
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<SessionUser> {
        input.validate()?;

        let email = normalize_email(&input.email);
        if self.repository.get_by_email(&email).await?.is_some() {
            tracing::info!("Registration rejected: e-mail already exists");
            return Err(UserError::DuplicateEmail(email));
        }

        let role = if self.repository.count().await? == 0 {
            Role::Admin
        } else {
            Role::User
        };

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repository
            .create(User::new(input.name, &email, password_hash, role))
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user.session_user())
    }

    /// Check credentials. Unknown e-mail and wrong password fail identically.
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<SessionUser> {
        let (email, password) = match (input.email, input.password) {
            (Some(email), Some(password))
                if !email.trim().is_empty() && !password.is_empty() =>
            {
                (email, password)
            }
            _ => return Err(UserError::MissingCredentials),
        };

        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user.session_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};

    fn register_input(name: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    fn login_input(email: Option<&str>, password: Option<&str>) -> LoginRequest {
        LoginRequest {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_first_user_is_admin_then_users() {
        let service = AuthService::new(InMemoryUserRepository::new());

        let first = service
            .register(register_input("Alice", "alice@example.com"))
            .await
            .unwrap();
        let second = service
            .register(register_input("Bob", "bob@example.com"))
            .await
            .unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(second.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_twice_is_duplicate_email() {
        let service = AuthService::new(InMemoryUserRepository::new());
        service
            .register(register_input("Alice", "alice@example.com"))
            .await
            .unwrap();

        let result = service
            .register(register_input("Alice", "ALICE@example.com"))
            .await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_validates_before_touching_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().never();
        repo.expect_create().never();

        let service = AuthService::new(repo);
        let result = service.register(register_input("Al", "bad")).await;
        assert!(matches!(result, Err(UserError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_raw_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        repo.expect_count().returning(|| Ok(3));
        repo.expect_create()
            .withf(|user| user.password_hash != "secret1" && user.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|user| Ok(user));

        let service = AuthService::new(repo);
        let session = service
            .register(register_input("Carol", "carol@example.com"))
            .await
            .unwrap();
        assert_eq!(session.role, Role::User);
    }

    #[tokio::test]
    async fn test_login_success_returns_same_identity() {
        let service = AuthService::new(InMemoryUserRepository::new());
        let registered = service
            .register(register_input("Alice", "alice@example.com"))
            .await
            .unwrap();

        let logged_in = service
            .login(login_input(Some("Alice@Example.com"), Some("secret1")))
            .await
            .unwrap();
        assert_eq!(logged_in, registered);
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let service = AuthService::new(InMemoryUserRepository::new());

        for input in [
            login_input(None, Some("secret1")),
            login_input(Some("alice@example.com"), None),
            login_input(Some("  "), Some("secret1")),
            login_input(Some("alice@example.com"), Some("")),
        ] {
            let result = service.login(input).await;
            assert!(matches!(result, Err(UserError::MissingCredentials)));
        }
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_fail_identically() {
        let service = AuthService::new(InMemoryUserRepository::new());
        service
            .register(register_input("Alice", "alice@example.com"))
            .await
            .unwrap();

        let unknown = service
            .login(login_input(Some("nobody@example.com"), Some("secret1")))
            .await
            .unwrap_err();
        let wrong = service
            .login(login_input(Some("alice@example.com"), Some("wrong-password")))
            .await
            .unwrap_err();

        assert!(matches!(unknown, UserError::InvalidCredentials));
        assert!(matches!(wrong, UserError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }
}
