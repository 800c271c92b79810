//! Server tree of the authorizations service, mounted at
//! `/api/authorizations/v1`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::Method;
use axum::response::Response;
use ocm_authorizations::{
    AccessReviewRequest, AccessReviewResponse, SelfAccessReviewRequest, SelfAccessReviewResponse,
};

use super::serve::serve_post;
use super::{Call, PostServerRequest, PostServerResponse};
use crate::app::errors::{send_method_not_allowed, send_not_found};

pub trait AuthorizationsServer: Send + Sync {
    fn access_review(&self) -> Option<Arc<dyn AccessReviewServer>> {
        None
    }

    fn self_access_review(&self) -> Option<Arc<dyn SelfAccessReviewServer>> {
        None
    }
}

/// Reviews whether an account can perform an action on a resource.
#[async_trait]
pub trait AccessReviewServer: Send + Sync {
    async fn post(
        &self,
        request: PostServerRequest<AccessReviewRequest>,
    ) -> anyhow::Result<PostServerResponse<AccessReviewResponse>>;
}

/// Same as [`AccessReviewServer`], for the account that sends the request.
#[async_trait]
pub trait SelfAccessReviewServer: Send + Sync {
    async fn post(
        &self,
        request: PostServerRequest<SelfAccessReviewRequest>,
    ) -> anyhow::Result<PostServerResponse<SelfAccessReviewResponse>>;
}

pub async fn dispatch_authorizations(
    server: &dyn AuthorizationsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => send_method_not_allowed(call),
        ["access_review", rest @ ..] => match server.access_review() {
            Some(target) => match rest {
                [] if *call.method() == Method::POST => {
                    serve_post(call, |r| target.post(r)).await
                }
                [] => send_method_not_allowed(call),
                _ => send_not_found(call),
            },
            None => send_not_found(call),
        },
        ["self_access_review", rest @ ..] => match server.self_access_review() {
            Some(target) => match rest {
                [] if *call.method() == Method::POST => {
                    serve_post(call, |r| target.post(r)).await
                }
                [] => send_method_not_allowed(call),
                _ => send_not_found(call),
            },
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}
