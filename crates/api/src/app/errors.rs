//! Uniform error responses.
//!
//! Every error is sent as the shared error envelope with
//! `Content-Type: application/json`; the identifier of the error is the HTTP
//! status.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use ocm_core::{ApiError, marshal};

use crate::server::Call;

/// Sends `error`, using its identifier as the status code.
///
/// Errors whose identifier isn't a valid status code are replaced by the panic
/// error.
pub fn send_error(error: &ApiError) -> Response {
    let Some(status) = error.status().and_then(|code| StatusCode::from_u16(code).ok()) else {
        tracing::error!(error = %error, id = ?error.id(), "error identifier isn't a status code");
        return send_panic();
    };
    match marshal(error) {
        Ok(body) => json_body(status, body),
        Err(err) => {
            tracing::error!(error = %err, "can't encode error response");
            send_panic()
        }
    }
}

/// Sends the panic error with status 500.
pub fn send_panic() -> Response {
    let body = marshal(&ApiError::panic()).unwrap_or_default();
    json_body(StatusCode::INTERNAL_SERVER_ERROR, body)
}

pub fn send_not_found(call: &Call) -> Response {
    send_error(&ApiError::not_found(call.path()))
}

pub fn send_method_not_allowed(call: &Call) -> Response {
    send_error(&ApiError::method_not_allowed(call.method().as_str(), call.path()))
}

pub fn send_internal_server_error(call: &Call) -> Response {
    send_error(&ApiError::internal_server_error(call.method().as_str(), call.path()))
}

pub(crate) fn json_body(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::Method;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn error_id_becomes_status() {
        let error = ApiError::builder().id("409").reason("Cluster name already in use").build();
        let response = send_error(&error);
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = body_of(response).await;
        assert_eq!(body["kind"], "Error");
        assert_eq!(body["reason"], "Cluster name already in use");
    }

    #[tokio::test]
    async fn non_numeric_id_sends_panic() {
        let response = send_error(&ApiError::builder().id("CLUSTERS-MGMT-400").build());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body["id"], "1000");
    }

    #[tokio::test]
    async fn routing_errors_name_method_and_path() {
        let call = Call::new(Method::PUT, "/api/clusters_mgmt/v1/clusters", None, Bytes::new());
        let body = body_of(send_method_not_allowed(&call)).await;
        assert_eq!(body["id"], "405");
        assert_eq!(
            body["reason"],
            "Method 'PUT' isn't supported for path '/api/clusters_mgmt/v1/clusters'"
        );

        let response = send_internal_server_error(&call);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(
            body["reason"],
            "Can't process 'PUT' request for path '/api/clusters_mgmt/v1/clusters' due to an internal server error"
        );
    }
}
