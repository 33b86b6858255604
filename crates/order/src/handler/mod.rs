mod http;
mod order;

pub use self::http::{health_handler, invoke_handler, metrics_handler, trigger_handler};
pub use self::order::OrderRequestHandler;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get, post},
};
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub struct AppRouter;

impl AppRouter {
    pub fn build(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", any(trigger_handler))
            .route("/orders", any(trigger_handler))
            .route("/invoke", post(invoke_handler))
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, state: Arc<AppState>) -> Result<()> {
        let app = Self::build(state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Orders function listening on http://{}", listener.local_addr()?);
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
