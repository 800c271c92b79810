//! HTTP application wiring (Axum router in front of the dispatch layer).
//!
//! - `routes/`: the health check and the fallback handing every other request
//!   to [`crate::server::dispatch`]
//! - `errors.rs`: uniform error responses

use std::sync::Arc;

use axum::{Extension, Router, extract::DefaultBodyLimit, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::server::Servers;

pub mod errors;
pub mod routes;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_SIZE: usize = 4 * 1024 * 1024;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(servers: Servers) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .fallback(routes::dispatch::dispatch)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
                .layer(Extension(Arc::new(servers))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::Service;

    #[tokio::test]
    async fn oversized_bodies_are_refused() {
        let mut app = build_app(crate::memory::servers());
        let request = Request::post("/api/clusters_mgmt/v1/clusters")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(vec![b' '; MAX_BODY_SIZE + 1]))
            .unwrap();
        let response = app.call(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["kind"], "Error");
        assert_eq!(body["id"], "413");
    }
}
