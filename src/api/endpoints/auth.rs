//! Signup, login, logout and current-user endpoints.
//!
//! Passwords are stored as salted PBKDF2 hashes; the login path compares
//! through `verify_password`, never against plaintext.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::{Extension, Json};
use pbkdf2::password_hash::rand_core::OsRng;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{clear_session_cookie, session_cookie, session_token, ApiContext, SessionContext};
use crate::db::repository::{create_user, get_user, get_user_by_username};
use crate::models::{Credentials, User};

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .and_then(|parsed| Pbkdf2.verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

fn validate_credentials(credentials: &Credentials) -> Result<(), ApiError> {
    if credentials.username.trim().is_empty() {
        return Err(ApiError::validation("Username is required", "username"));
    }
    if credentials.password.is_empty() {
        return Err(ApiError::validation("Password is required", "password"));
    }
    Ok(())
}

/// `POST /api/signup` — create an account and open a session.
pub async fn signup(
    State(ctx): State<ApiContext>,
    Json(credentials): Json<Credentials>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_credentials(&credentials)?;
    let password_hash = hash_password(&credentials.password)?;

    let user = {
        let conn = ctx.conn()?;
        if get_user_by_username(&conn, &credentials.username)?.is_some() {
            return Err(ApiError::validation("Username already exists", "username"));
        }
        create_user(&conn, &credentials.username, &password_hash)?
    };

    let token = ctx.lock_sessions()?.issue(user.id);
    tracing::info!(username = %user.username, "Account created");

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, session_cookie(&token))],
        Json(MessageResponse {
            message: "Account created successfully".to_string(),
        }),
    ))
}

/// `POST /api/login` — verify credentials and open a session.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(credentials): Json<Credentials>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_credentials(&credentials)?;

    let user = {
        let conn = ctx.conn()?;
        get_user_by_username(&conn, &credentials.username)?
    };

    let user = match user {
        Some(user) if verify_password(&credentials.password, &user.password) => user,
        _ => return Err(ApiError::InvalidCredentials),
    };

    let token = ctx.lock_sessions()?.issue(user.id);

    Ok((
        [(SET_COOKIE, session_cookie(&token))],
        Json(MessageResponse {
            message: "Logged in successfully".to_string(),
        }),
    ))
}

/// `POST /api/logout` — revoke the session and clear the cookie.
pub async fn logout(
    State(ctx): State<ApiContext>,
    headers: axum::http::HeaderMap,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if let Some(token) = session_token(&headers) {
        ctx.lock_sessions()?.revoke(&token);
    }

    Ok((
        [(SET_COOKIE, clear_session_cookie())],
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

/// `GET /api/me` — the authenticated user.
pub async fn me(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<User>, ApiError> {
    let conn = ctx.conn()?;
    let user = get_user(&conn, session.user_id)?.ok_or(ApiError::Unauthorized)?;
    Ok(Json(user))
}
