use super::config::SessionConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Role attached to every user and carried in the session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Minimal identity embedded in the session token.
///
/// Derived from a stored user on login or registration and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: Uuid,
    pub name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn new(user_id: Uuid, name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            name: name.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Signed session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub user: SessionUser,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies HS256 session tokens and renders the session cookie.
///
/// Stateless: logging out replaces the cookie with an expired one, nothing is
/// stored server-side.
#[derive(Clone)]
pub struct SessionManager {
    secret: String,
    ttl_seconds: i64,
    secure_cookies: bool,
}

impl SessionManager {
    /// Create a session manager.
    ///
    /// `secure_cookies` adds the `Secure` attribute; enable it when the
    /// service is behind HTTPS.
    pub fn new(config: &SessionConfig, secure_cookies: bool) -> Self {
        tracing::info!(ttl_seconds = config.ttl_seconds, "Session manager initialized");
        Self {
            secret: config.secret.clone(),
            ttl_seconds: config.ttl_seconds,
            secure_cookies,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Sign a token for the given identity.
    pub fn issue(&self, user: &SessionUser) -> eyre::Result<String> {
        self.issue_with_ttl(user, self.ttl_seconds)
    }

    fn issue_with_ttl(&self, user: &SessionUser, ttl_seconds: i64) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            user: user.clone(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify token signature and expiry and decode the claims.
    pub fn verify(&self, token: &str) -> eyre::Result<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// `Set-Cookie` value carrying a freshly issued token.
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.secure_attr(),
            self.ttl_seconds
        )
    }

    /// `Set-Cookie` value replacing the session with an already-expired one.
    pub fn expired_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly;{} SameSite=Strict; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            SESSION_COOKIE,
            self.secure_attr()
        )
    }

    fn secure_attr(&self) -> &'static str {
        if self.secure_cookies { " Secure;" } else { "" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    fn manager(secure: bool) -> SessionManager {
        SessionManager::new(&SessionConfig::new(SECRET), secure)
    }

    fn alice() -> SessionUser {
        SessionUser::new(Uuid::now_v7(), "alice", Role::User)
    }

    #[test]
    fn test_issue_then_verify_returns_identity() {
        let sessions = manager(false);
        let user = alice();

        let token = sessions.issue(&user).unwrap();
        let claims = sessions.verify(&token).unwrap();

        assert_eq!(claims.user, user);
        assert_eq!(claims.exp - claims.iat, sessions.ttl_seconds());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = SessionManager::new(
            &SessionConfig::new("another-secret-that-is-also-32-chars-long"),
            false,
        );
        let token = other.issue(&alice()).unwrap();

        assert!(manager(false).verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let sessions = manager(false);
        // Beyond the default 60s validation leeway.
        let token = sessions.issue_with_ttl(&alice(), -600).unwrap();

        assert!(sessions.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(manager(false).verify("not.a.token").is_err());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = manager(false).session_cookie("abc");
        assert!(cookie.starts_with("token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));

        let secure = manager(true).session_cookie("abc");
        assert!(secure.contains("Secure;"));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = manager(false).expired_cookie();
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_role_parsing_and_display() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_session_user_json_shape() {
        let user = SessionUser::new(Uuid::nil(), "bob", Role::Admin);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["name"], "bob");
        assert_eq!(json["role"], "admin");
        assert!(json.get("userId").is_some());
    }
}
