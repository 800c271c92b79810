//! Adapters between HTTP calls and the methods of server implementations.
//!
//! Each adapter reads the typed request from the call, invokes the handler and
//! writes the typed response. Read, handler and write failures are logged and
//! answered with a 500 error, except handler errors that are an [`ApiError`],
//! which are sent as they are.

use std::future::Future;

use axum::response::Response;
use ocm_core::{ApiError, Wire};

use super::{
    AddServerRequest, AddServerResponse, Call, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, PostServerRequest,
    PostServerResponse, UpdateServerRequest, UpdateServerResponse,
};
use crate::app::errors::{send_error, send_internal_server_error};

fn read_failed(call: &Call, err: &ocm_core::Error) -> Response {
    tracing::error!(
        method = %call.method(),
        path = call.path(),
        error = %err,
        "can't read request"
    );
    send_internal_server_error(call)
}

fn handler_failed(call: &Call, err: anyhow::Error) -> Response {
    if let Some(api_error) = err.downcast_ref::<ApiError>() {
        tracing::debug!(
            method = %call.method(),
            path = call.path(),
            error = %api_error,
            "handler returned an API error"
        );
        return send_error(api_error);
    }
    tracing::error!(
        method = %call.method(),
        path = call.path(),
        error = %format!("{err:#}"),
        "can't process request"
    );
    send_internal_server_error(call)
}

fn write(call: &Call, written: ocm_core::Result<Response>) -> Response {
    written.unwrap_or_else(|err| {
        tracing::error!(
            method = %call.method(),
            path = call.path(),
            error = %err,
            "can't write response"
        );
        send_internal_server_error(call)
    })
}

pub(crate) async fn serve_list<T, F, Fut>(call: &Call, kind: &str, handler: F) -> Response
where
    T: Wire,
    F: FnOnce(ListServerRequest) -> Fut,
    Fut: Future<Output = anyhow::Result<ListServerResponse<T>>>,
{
    let request = match ListServerRequest::read(call) {
        Ok(request) => request,
        Err(err) => return read_failed(call, &err),
    };
    match handler(request).await {
        Ok(response) => write(call, response.write(kind)),
        Err(err) => handler_failed(call, err),
    }
}

pub(crate) async fn serve_get<T, F, Fut>(call: &Call, handler: F) -> Response
where
    T: Wire,
    F: FnOnce(GetServerRequest) -> Fut,
    Fut: Future<Output = anyhow::Result<GetServerResponse<T>>>,
{
    match handler(GetServerRequest::default()).await {
        Ok(response) => write(call, response.write()),
        Err(err) => handler_failed(call, err),
    }
}

pub(crate) async fn serve_add<T, F, Fut>(call: &Call, handler: F) -> Response
where
    T: Wire,
    F: FnOnce(AddServerRequest<T>) -> Fut,
    Fut: Future<Output = anyhow::Result<AddServerResponse<T>>>,
{
    let request = match AddServerRequest::read(call) {
        Ok(request) => request,
        Err(err) => return read_failed(call, &err),
    };
    match handler(request).await {
        Ok(response) => write(call, response.write()),
        Err(err) => handler_failed(call, err),
    }
}

pub(crate) async fn serve_update<T, F, Fut>(call: &Call, handler: F) -> Response
where
    T: Wire,
    F: FnOnce(UpdateServerRequest<T>) -> Fut,
    Fut: Future<Output = anyhow::Result<UpdateServerResponse<T>>>,
{
    let request = match UpdateServerRequest::read(call) {
        Ok(request) => request,
        Err(err) => return read_failed(call, &err),
    };
    match handler(request).await {
        Ok(response) => write(call, response.write()),
        Err(err) => handler_failed(call, err),
    }
}

pub(crate) async fn serve_delete<F, Fut>(call: &Call, handler: F) -> Response
where
    F: FnOnce(DeleteServerRequest) -> Fut,
    Fut: Future<Output = anyhow::Result<DeleteServerResponse>>,
{
    match handler(DeleteServerRequest::default()).await {
        Ok(response) => write(call, response.write()),
        Err(err) => handler_failed(call, err),
    }
}

pub(crate) async fn serve_post<B, R, F, Fut>(call: &Call, handler: F) -> Response
where
    B: Wire,
    R: Wire,
    F: FnOnce(PostServerRequest<B>) -> Fut,
    Fut: Future<Output = anyhow::Result<PostServerResponse<R>>>,
{
    let request = match PostServerRequest::read(call) {
        Ok(request) => request,
        Err(err) => return read_failed(call, &err),
    };
    match handler(request).await {
        Ok(response) => write(call, response.write()),
        Err(err) => handler_failed(call, err),
    }
}
