use super::session::{Role, SESSION_COOKIE, SessionManager, SessionUser};
use crate::errors::AppError;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};

/// Extract the session token from the `token` cookie, falling back to an
/// `Authorization: Bearer` header.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie_value(headers, SESSION_COOKIE)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|auth| auth.strip_prefix("Bearer "))
                .map(|s| s.trim().to_string())
                .filter(|t| !t.is_empty())
        })
}

fn extract_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

/// Authenticated identity of the caller.
///
/// Rejects with `401 Unauthorized` when no valid session token is present.
/// Works with any router state that exposes a [`SessionManager`] via
/// `FromRef`.
///
/// ```ignore
/// async fn me(AuthUser(user): AuthUser) -> Json<SessionUser> {
///     Json(user)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthUser
where
    SessionManager: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionManager::from_ref(state);

        let token = extract_token(&parts.headers).ok_or_else(|| {
            tracing::debug!("No session token in cookie or Authorization header");
            AppError::Unauthorized("Authentication invalid".to_string())
        })?;

        let claims = sessions.verify(&token).map_err(|e| {
            tracing::debug!("Session token verification failed: {}", e);
            AppError::Unauthorized("Authentication invalid".to_string())
        })?;

        Ok(AuthUser(claims.user))
    }
}

/// Fail with `403 Forbidden` unless the user holds one of `roles`.
pub fn authorize_roles(user: &SessionUser, roles: &[Role]) -> Result<(), AppError> {
    if roles.contains(&user.role) {
        Ok(())
    } else {
        tracing::info!(user_id = %user.user_id, role = %user.role, "Role not permitted");
        Err(AppError::Forbidden(
            "Unauthorized to access this route".to_string(),
        ))
    }
}
