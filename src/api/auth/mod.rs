//! Authentication Routes

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::{ADMIN_ONLY, require_role};
use crate::core::AppState;

/// Build authentication router
/// - /api/auth/login: public (no auth required)
/// - /api/auth/me: protected (global require_auth middleware)
/// - /api/auth/register: admin only
pub fn router() -> Router<AppState> {
    Router::new()
        // Public route - no auth middleware applied
        .route("/api/auth/login", post(handler::login))
        // Protected routes - require authentication (handled by global require_auth middleware)
        .route("/api/auth/me", get(handler::me))
        .route(
            "/api/auth/register",
            post(handler::register).layer(middleware::from_fn(require_role(ADMIN_ONLY))),
        )
}
