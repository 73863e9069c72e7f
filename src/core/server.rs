//! Server Implementation
//!
//! HTTP 服务器启动和管理

use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth;
use crate::core::{AppState, Config};

/// HTTP Server
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    pub fn with_state(config: Config, state: AppState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = self.state.clone();

        let app = api::router(state.clone())
            .layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_auth,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Mesa server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
