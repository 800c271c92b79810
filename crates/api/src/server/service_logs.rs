//! Server tree of the service logs service, mounted at `/api/service_logs/v1`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::Method;
use axum::response::Response;
use ocm_core::Class;
use ocm_servicelogs::LogEntry;

use super::serve::{serve_add, serve_delete, serve_get, serve_list};
use super::{
    AddServerRequest, AddServerResponse, Call, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse,
};
use crate::app::errors::{send_method_not_allowed, send_not_found};

pub trait ServiceLogsServer: Send + Sync {
    fn cluster_logs(&self) -> Option<Arc<dyn ClusterLogsServer>> {
        None
    }
}

/// Log entries of every cluster.
#[async_trait]
pub trait ClusterLogsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<LogEntry>>;

    async fn add(
        &self,
        request: AddServerRequest<LogEntry>,
    ) -> anyhow::Result<AddServerResponse<LogEntry>>;

    fn log_entry(&self, _id: &str) -> Option<Arc<dyn LogEntryServer>> {
        None
    }
}

#[async_trait]
pub trait LogEntryServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> anyhow::Result<GetServerResponse<LogEntry>>;

    async fn delete(&self, request: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse>;
}

pub async fn dispatch_service_logs(
    server: &dyn ServiceLogsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => send_method_not_allowed(call),
        ["cluster_logs", rest @ ..] => match server.cluster_logs() {
            Some(target) => dispatch_cluster_logs(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_cluster_logs(
    server: &dyn ClusterLogsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, LogEntry::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.log_entry(id) {
            Some(target) => match rest {
                [] => match *call.method() {
                    Method::GET => serve_get(call, |r| target.get(r)).await,
                    Method::DELETE => serve_delete(call, |r| target.delete(r)).await,
                    _ => send_method_not_allowed(call),
                },
                _ => send_not_found(call),
            },
            None => send_not_found(call),
        },
    }
}
