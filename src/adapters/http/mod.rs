//! HTTP API
//!
//! ## Endpoints
//!
//! - POST /receipts/process - Score a receipt, returns `{"id": ...}`
//! - GET /receipts/{id}/points - Points recorded for an id, returns `{"points": ...}`
//! - GET /health - Liveness check

pub mod dto;
pub mod error;
pub mod handlers;

use axum::{routing::get, routing::post, Router};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::core::service::ReceiptService;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

/// API server state
#[derive(Clone)]
pub struct AppState {
    pub service: ReceiptService,
    pub version: String,
}

impl AppState {
    pub fn new(service: ReceiptService) -> Self {
        Self {
            service,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/receipts/process", post(handlers::process_receipt))
        .route("/receipts/{id}/points", get(handlers::get_points))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn bind<C: ConfigProvider>(config: &C) -> Result<TcpListener> {
    let listener = TcpListener::bind((config.host(), config.port())).await?;
    Ok(listener)
}

/// Serves `state` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Receipt API listening on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Receipt API stopped");
    Ok(())
}

/// Start server in background (for testing)
pub async fn start_background_server(state: AppState) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = serve(listener, state, std::future::pending()).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::SledScoreStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = SledScoreStore::temporary().unwrap();
        create_router(AppState::new(ReceiptService::new(Arc::new(store))))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_points_for_non_uuid_is_bad_request() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/receipts/123/points")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_process_without_body_is_bad_request() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/receipts/process")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
