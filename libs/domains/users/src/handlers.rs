//! HTTP handlers for registration, login and logout

use axum::{
    Json, Router,
    extract::{FromRef, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
};
use axum_helpers::{
    AppError, SessionManager, SessionUser, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{AuthResponse, LoginRequest, LogoutResponse, RegisterRequest};
use crate::repository::UserRepository;
use crate::service::AuthService;

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, login, logout),
    components(
        schemas(RegisterRequest, LoginRequest, AuthResponse, LogoutResponse, SessionUser),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration and cookie sessions")
    )
)]
pub struct ApiDoc;

pub struct AuthState<R: UserRepository> {
    pub service: Arc<AuthService<R>>,
    pub sessions: SessionManager,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sessions: self.sessions.clone(),
        }
    }
}

impl<R: UserRepository> FromRef<AuthState<R>> for SessionManager {
    fn from_ref(state: &AuthState<R>) -> Self {
        state.sessions.clone()
    }
}

/// Create the auth router
pub fn router<R: UserRepository + 'static>(
    service: AuthService<R>,
    sessions: SessionManager,
) -> Router {
    let state = AuthState {
        service: Arc::new(service),
        sessions,
    };

    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
        .route("/logout", get(logout))
        .with_state(state)
}

fn cookie_header(value: String) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&value)
        .map_err(|e| AppError::InternalServerError(format!("Failed to create cookie: {}", e)))
}

type SessionResponse = (
    StatusCode,
    AppendHeaders<[(HeaderName, HeaderValue); 1]>,
    Json<AuthResponse>,
);

/// Issue a session for `user` and render the response with its cookie.
fn with_session(
    sessions: &SessionManager,
    status: StatusCode,
    user: SessionUser,
) -> Result<SessionResponse, AppError> {
    let token = sessions
        .issue(&user)
        .map_err(|e| AppError::InternalServerError(format!("Failed to issue session: {}", e)))?;
    let cookie = cookie_header(sessions.session_cookie(&token))?;

    Ok((
        status,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(AuthResponse { user }),
    ))
}

/// Register a new account and start a session
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered; session cookie set", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<SessionResponse, AppError> {
    let user = state.service.register(input).await?;
    with_session(&state.sessions, StatusCode::CREATED, user)
}

/// Log in with e-mail and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = AuthResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<SessionResponse, AppError> {
    let user = state.service.login(input).await?;
    with_session(&state.sessions, StatusCode::OK, user)
}

/// Log out by replacing the session cookie with an expired one
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Logged out; cookie expired", body = LogoutResponse)
    )
)]
async fn logout(State(sessions): State<SessionManager>) -> Result<impl IntoResponse, AppError> {
    let cookie = cookie_header(sessions.expired_cookie())?;

    Ok((
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LogoutResponse {
            msg: "user logged out".to_string(),
        }),
    ))
}
