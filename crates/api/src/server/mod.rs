//! Server side of the SDK: typed requests and responses, the server trait trees
//! of each API group and the dispatch of calls to them.
//!
//! A call is routed by consuming its path segments: the first three select the
//! API group (`/api/<group>/v1`), then every level consults a locator of the
//! current server until the path is exhausted, where the method selects the
//! handler.

use std::sync::Arc;

use axum::response::Response;

pub mod accounts_mgmt;
pub mod authorizations;
mod call;
pub mod clusters_mgmt;
mod request;
mod response;
pub(crate) mod serve;
pub mod service_logs;

pub use accounts_mgmt::AccountsMgmtServer;
pub use authorizations::AuthorizationsServer;
pub use call::Call;
pub use clusters_mgmt::ClustersMgmtServer;
pub use service_logs::ServiceLogsServer;
pub use request::{
    AddServerRequest, DeleteServerRequest, GetServerRequest, ListServerRequest, PostServerRequest,
    UpdateServerRequest,
};
pub use response::{
    AddServerResponse, DeleteServerResponse, GetServerResponse, ListServerResponse,
    PostServerResponse, UpdateServerResponse,
};

use crate::app::errors::send_not_found;

/// Roots of the API groups served by an application. Groups left unset answer
/// every call with 404.
#[derive(Clone, Default)]
pub struct Servers {
    clusters_mgmt: Option<Arc<dyn ClustersMgmtServer>>,
    accounts_mgmt: Option<Arc<dyn AccountsMgmtServer>>,
    authorizations: Option<Arc<dyn AuthorizationsServer>>,
    service_logs: Option<Arc<dyn ServiceLogsServer>>,
}

impl Servers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clusters_mgmt(mut self, server: Arc<dyn ClustersMgmtServer>) -> Self {
        self.clusters_mgmt = Some(server);
        self
    }

    pub fn accounts_mgmt(mut self, server: Arc<dyn AccountsMgmtServer>) -> Self {
        self.accounts_mgmt = Some(server);
        self
    }

    pub fn authorizations(mut self, server: Arc<dyn AuthorizationsServer>) -> Self {
        self.authorizations = Some(server);
        self
    }

    pub fn service_logs(mut self, server: Arc<dyn ServiceLogsServer>) -> Self {
        self.service_logs = Some(server);
        self
    }
}

/// Routes `call` to the server that owns its path and returns the response.
pub async fn dispatch(servers: &Servers, call: &Call) -> Response {
    let segments = call.segments();
    match segments.as_slice() {
        ["api", "clusters_mgmt", "v1", rest @ ..] => match &servers.clusters_mgmt {
            Some(server) => {
                clusters_mgmt::dispatch_clusters_mgmt(server.as_ref(), call, rest).await
            }
            None => send_not_found(call),
        },
        ["api", "accounts_mgmt", "v1", rest @ ..] => match &servers.accounts_mgmt {
            Some(server) => {
                accounts_mgmt::dispatch_accounts_mgmt(server.as_ref(), call, rest).await
            }
            None => send_not_found(call),
        },
        ["api", "authorizations", "v1", rest @ ..] => match &servers.authorizations {
            Some(server) => {
                authorizations::dispatch_authorizations(server.as_ref(), call, rest).await
            }
            None => send_not_found(call),
        },
        ["api", "service_logs", "v1", rest @ ..] => match &servers.service_logs {
            Some(server) => service_logs::dispatch_service_logs(server.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}
