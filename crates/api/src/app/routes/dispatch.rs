use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, rejection::BytesRejection},
    http::{Method, Uri},
    response::Response,
};
use ocm_core::ApiError;

use crate::app::errors::send_error;
use crate::server::{self, Call, Servers};

/// Reads the whole request and routes it through the server trees.
///
/// Bodies larger than the limit set by [`crate::app::build_app`] are refused
/// with `413` before any server sees them.
pub async fn dispatch(
    Extension(servers): Extension<Arc<Servers>>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match body {
        Ok(body) => {
            let call = Call::new(method, uri.path(), uri.query(), body);
            tracing::debug!(method = %call.method(), path = call.path(), "dispatching request");
            server::dispatch(&servers, &call).await
        }
        Err(rejection) => {
            let status = rejection.status();
            let reason = rejection.body_text();
            tracing::warn!(
                method = %method,
                path = uri.path(),
                status = status.as_u16(),
                error = %reason,
                "can't read request body"
            );
            send_error(
                &ApiError::builder()
                    .id(status.as_u16().to_string())
                    .reason(reason)
                    .build(),
            )
        }
    }
}
