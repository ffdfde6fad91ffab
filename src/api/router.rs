//! API router.
//!
//! Routes are nested under `/api/`. Clinic routes require a session cookie;
//! signup/login/logout do not.
//!
//! Middleware uses `Extension<ApiContext>` (injected as the outermost
//! layer). Endpoint handlers use `State<ApiContext>` (provided via
//! `with_state`).

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the clinic API router.
pub fn api_router(ctx: ApiContext) -> Router {
    // Protected routes — require a valid session cookie
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/me", get(endpoints::auth::me))
        .route(
            "/doctors",
            get(endpoints::doctors::list).post(endpoints::doctors::create),
        )
        .route("/doctors/:id", put(endpoints::doctors::update))
        .route("/doctors/:id/break", post(endpoints::doctors::give_break))
        .route("/doctors/:id/fatigue", get(endpoints::doctors::fatigue_status))
        .route("/patients", get(endpoints::patients::list))
        .route("/patients/search", get(endpoints::patients::search))
        .route("/walkin", post(endpoints::patients::walkin))
        .route("/appointments", get(endpoints::appointments::list))
        .route(
            "/appointments/:id/status",
            put(endpoints::appointments::update_status),
        )
        .route("/dashboard", get(endpoints::dashboard::data))
        .route(
            "/load-balance/suggestions",
            get(endpoints::dashboard::load_balance_suggestions),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_session))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    // Unprotected routes (no session required)
    let unprotected = Router::new()
        .route("/signup", post(endpoints::auth::signup))
        .route("/login", post(endpoints::auth::login))
        .route("/logout", post(endpoints::auth::logout))
        .with_state(ctx.clone())
        .layer(axum::Extension(ctx));

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
        .layer(CorsLayer::permissive())
}
