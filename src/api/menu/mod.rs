//! Menu API 模块

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::{ADMIN_ONLY, require_role};
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<AppState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_role(ADMIN_ONLY)));

    read_routes.merge(manage_routes)
}
