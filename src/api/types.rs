//! Shared types for the API layer: request context, session store, cookies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use rusqlite::Connection;

use crate::api::error::ApiError;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "clinic_session";

/// Session lifetime: 7 days, matching the browser cookie's Max-Age.
const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

// ═══════════════════════════════════════════════════════════
// API context — shared state for all routes and middleware
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware. The database handle is
/// injected here rather than reached through a global, so tests can
/// substitute an in-memory database.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<Mutex<Connection>>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }

    /// Lock the database connection for the duration of a handler's work.
    /// The guard must not be held across an `.await`.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }

    pub fn lock_sessions(&self) -> Result<MutexGuard<'_, SessionStore>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session lock poisoned".into()))
    }
}

/// Authenticated user context, injected into request extensions by the
/// session middleware.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: i64,
}

// ═══════════════════════════════════════════════════════════
// Session store — opaque cookie tokens with TTL
// ═══════════════════════════════════════════════════════════

struct SessionEntry {
    user_id: i64,
    expires_at: Instant,
}

/// In-memory session store keyed by opaque token.
pub struct SessionStore {
    sessions: HashMap<String, SessionEntry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Open a session for a user and return its token.
    pub fn issue(&mut self, user_id: i64) -> String {
        // Periodic cleanup when the store grows large
        if self.sessions.len() > 1000 {
            self.cleanup();
        }
        let token = generate_token();
        self.sessions.insert(
            token.clone(),
            SessionEntry {
                user_id,
                expires_at: Instant::now() + SESSION_TTL,
            },
        );
        token
    }

    /// Resolve a token to its user id, dropping it when expired.
    pub fn validate(&mut self, token: &str) -> Option<i64> {
        match self.sessions.get(token) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.user_id),
            Some(_) => {
                self.sessions.remove(token);
                None
            }
            None => None,
        }
    }

    pub fn revoke(&mut self, token: &str) {
        self.sessions.remove(token);
    }

    fn cleanup(&mut self) {
        let now = Instant::now();
        self.sessions.retain(|_, entry| now < entry.expires_at);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a random session token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

// ═══════════════════════════════════════════════════════════
// Cookie plumbing
// ═══════════════════════════════════════════════════════════

/// Extract the session token from a request's `Cookie` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// `Set-Cookie` value that opens a session.
///
/// No `Secure` attribute: the service binds to loopback and TLS is expected
/// to terminate at a reverse proxy. Add `Secure` before serving the cookie
/// over HTTPS directly.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_TTL.as_secs()
    )
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
