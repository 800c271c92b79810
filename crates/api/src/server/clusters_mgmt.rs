//! Server tree of the clusters management service, mounted at
//! `/api/clusters_mgmt/v1`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::Method;
use axum::response::Response;
use ocm_clustersmgmt::{
    AddOn, AddOnInstallation, CloudProvider, CloudRegion, Cluster, ClusterCredentials,
    ClusterStatus, Flavour, Group, IdentityProvider, Ingress, Log, MachinePool, MachineType,
    UpgradePolicy, User, Version,
};
use ocm_core::Class;

use super::serve::{serve_add, serve_delete, serve_get, serve_list, serve_update};
use super::{
    AddServerRequest, AddServerResponse, Call, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse,
    UpdateServerRequest, UpdateServerResponse,
};
use crate::app::errors::{send_method_not_allowed, send_not_found};

type Handled<T> = anyhow::Result<T>;

/// Root of the clusters management service.
pub trait ClustersMgmtServer: Send + Sync {
    fn clusters(&self) -> Option<Arc<dyn ClustersServer>> {
        None
    }

    fn flavours(&self) -> Option<Arc<dyn FlavoursServer>> {
        None
    }

    fn cloud_providers(&self) -> Option<Arc<dyn CloudProvidersServer>> {
        None
    }

    fn versions(&self) -> Option<Arc<dyn VersionsServer>> {
        None
    }

    fn addons(&self) -> Option<Arc<dyn AddOnsServer>> {
        None
    }

    fn machine_types(&self) -> Option<Arc<dyn MachineTypesServer>> {
        None
    }
}

/// Manages the collection of clusters.
#[async_trait]
pub trait ClustersServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Cluster>>;

    /// Provisions a new cluster.
    async fn add(&self, request: AddServerRequest<Cluster>) -> Handled<AddServerResponse<Cluster>>;

    fn cluster(&self, _id: &str) -> Option<Arc<dyn ClusterServer>> {
        None
    }
}

/// Manages a specific cluster.
#[async_trait]
pub trait ClusterServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Cluster>>;

    async fn update(
        &self,
        request: UpdateServerRequest<Cluster>,
    ) -> Handled<UpdateServerResponse<Cluster>>;

    /// Deprovisions the cluster.
    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;

    fn status(&self) -> Option<Arc<dyn ClusterStatusServer>> {
        None
    }

    fn credentials(&self) -> Option<Arc<dyn CredentialsServer>> {
        None
    }

    fn logs(&self) -> Option<Arc<dyn LogsServer>> {
        None
    }

    fn groups(&self) -> Option<Arc<dyn GroupsServer>> {
        None
    }

    fn identity_providers(&self) -> Option<Arc<dyn IdentityProvidersServer>> {
        None
    }

    fn ingresses(&self) -> Option<Arc<dyn IngressesServer>> {
        None
    }

    fn machine_pools(&self) -> Option<Arc<dyn MachinePoolsServer>> {
        None
    }

    fn upgrade_policies(&self) -> Option<Arc<dyn UpgradePoliciesServer>> {
        None
    }

    fn addons(&self) -> Option<Arc<dyn AddOnInstallationsServer>> {
        None
    }
}

#[async_trait]
pub trait ClusterStatusServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<ClusterStatus>>;
}

/// Credentials of a cluster: admin user, kubeconfig and SSH key pair.
#[async_trait]
pub trait CredentialsServer: Send + Sync {
    async fn get(
        &self,
        request: GetServerRequest,
    ) -> Handled<GetServerResponse<ClusterCredentials>>;
}

#[async_trait]
pub trait LogsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Log>>;

    fn log(&self, _id: &str) -> Option<Arc<dyn LogServer>> {
        None
    }
}

#[async_trait]
pub trait LogServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Log>>;
}

#[async_trait]
pub trait GroupsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Group>>;

    fn group(&self, _id: &str) -> Option<Arc<dyn GroupServer>> {
        None
    }
}

#[async_trait]
pub trait GroupServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Group>>;

    fn users(&self) -> Option<Arc<dyn UsersServer>> {
        None
    }
}

/// Members of a group.
#[async_trait]
pub trait UsersServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<User>>;

    async fn add(&self, request: AddServerRequest<User>) -> Handled<AddServerResponse<User>>;

    fn user(&self, _id: &str) -> Option<Arc<dyn UserServer>> {
        None
    }
}

#[async_trait]
pub trait UserServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<User>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait IdentityProvidersServer: Send + Sync {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> Handled<ListServerResponse<IdentityProvider>>;

    async fn add(
        &self,
        request: AddServerRequest<IdentityProvider>,
    ) -> Handled<AddServerResponse<IdentityProvider>>;

    fn identity_provider(&self, _id: &str) -> Option<Arc<dyn IdentityProviderServer>> {
        None
    }
}

#[async_trait]
pub trait IdentityProviderServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<IdentityProvider>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait IngressesServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Ingress>>;

    fn ingress(&self, _id: &str) -> Option<Arc<dyn IngressServer>> {
        None
    }
}

#[async_trait]
pub trait IngressServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Ingress>>;

    async fn update(
        &self,
        request: UpdateServerRequest<Ingress>,
    ) -> Handled<UpdateServerResponse<Ingress>>;
}

#[async_trait]
pub trait MachinePoolsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<MachinePool>>;

    async fn add(
        &self,
        request: AddServerRequest<MachinePool>,
    ) -> Handled<AddServerResponse<MachinePool>>;

    fn machine_pool(&self, _id: &str) -> Option<Arc<dyn MachinePoolServer>> {
        None
    }
}

#[async_trait]
pub trait MachinePoolServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<MachinePool>>;

    async fn update(
        &self,
        request: UpdateServerRequest<MachinePool>,
    ) -> Handled<UpdateServerResponse<MachinePool>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait UpgradePoliciesServer: Send + Sync {
    async fn list(&self, request: ListServerRequest)
    -> Handled<ListServerResponse<UpgradePolicy>>;

    async fn add(
        &self,
        request: AddServerRequest<UpgradePolicy>,
    ) -> Handled<AddServerResponse<UpgradePolicy>>;

    fn upgrade_policy(&self, _id: &str) -> Option<Arc<dyn UpgradePolicyServer>> {
        None
    }
}

#[async_trait]
pub trait UpgradePolicyServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<UpgradePolicy>>;

    async fn update(
        &self,
        request: UpdateServerRequest<UpgradePolicy>,
    ) -> Handled<UpdateServerResponse<UpgradePolicy>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

/// Add-ons installed on a cluster.
#[async_trait]
pub trait AddOnInstallationsServer: Send + Sync {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> Handled<ListServerResponse<AddOnInstallation>>;

    async fn add(
        &self,
        request: AddServerRequest<AddOnInstallation>,
    ) -> Handled<AddServerResponse<AddOnInstallation>>;

    fn addon_installation(&self, _id: &str) -> Option<Arc<dyn AddOnInstallationServer>> {
        None
    }
}

#[async_trait]
pub trait AddOnInstallationServer: Send + Sync {
    async fn get(&self, request: GetServerRequest)
    -> Handled<GetServerResponse<AddOnInstallation>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait FlavoursServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Flavour>>;

    async fn add(&self, request: AddServerRequest<Flavour>) -> Handled<AddServerResponse<Flavour>>;

    fn flavour(&self, _id: &str) -> Option<Arc<dyn FlavourServer>> {
        None
    }
}

#[async_trait]
pub trait FlavourServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Flavour>>;

    async fn update(
        &self,
        request: UpdateServerRequest<Flavour>,
    ) -> Handled<UpdateServerResponse<Flavour>>;
}

#[async_trait]
pub trait CloudProvidersServer: Send + Sync {
    async fn list(&self, request: ListServerRequest)
    -> Handled<ListServerResponse<CloudProvider>>;

    fn cloud_provider(&self, _id: &str) -> Option<Arc<dyn CloudProviderServer>> {
        None
    }
}

#[async_trait]
pub trait CloudProviderServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<CloudProvider>>;

    fn regions(&self) -> Option<Arc<dyn CloudRegionsServer>> {
        None
    }
}

#[async_trait]
pub trait CloudRegionsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<CloudRegion>>;

    fn region(&self, _id: &str) -> Option<Arc<dyn CloudRegionServer>> {
        None
    }
}

#[async_trait]
pub trait CloudRegionServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<CloudRegion>>;
}

#[async_trait]
pub trait VersionsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Version>>;

    fn version(&self, _id: &str) -> Option<Arc<dyn VersionServer>> {
        None
    }
}

#[async_trait]
pub trait VersionServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Version>>;
}

/// Catalog of add-ons.
#[async_trait]
pub trait AddOnsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<AddOn>>;

    async fn add(&self, request: AddServerRequest<AddOn>) -> Handled<AddServerResponse<AddOn>>;

    fn addon(&self, _id: &str) -> Option<Arc<dyn AddOnServer>> {
        None
    }
}

#[async_trait]
pub trait AddOnServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<AddOn>>;

    async fn update(&self, request: UpdateServerRequest<AddOn>)
    -> Handled<UpdateServerResponse<AddOn>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait MachineTypesServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<MachineType>>;
}

/// Navigates the tree rooted at `server` following `segments`, then invokes the
/// matching method.
pub async fn dispatch_clusters_mgmt(
    server: &dyn ClustersMgmtServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => send_method_not_allowed(call),
        ["clusters", rest @ ..] => match server.clusters() {
            Some(target) => dispatch_clusters(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["flavours", rest @ ..] => match server.flavours() {
            Some(target) => dispatch_flavours(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["cloud_providers", rest @ ..] => match server.cloud_providers() {
            Some(target) => dispatch_cloud_providers(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["versions", rest @ ..] => match server.versions() {
            Some(target) => dispatch_versions(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["addons", rest @ ..] => match server.addons() {
            Some(target) => dispatch_addons(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["machine_types", rest @ ..] => match server.machine_types() {
            Some(target) => dispatch_machine_types(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_clusters(server: &dyn ClustersServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Cluster::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.cluster(id) {
            Some(target) => dispatch_cluster(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_cluster(server: &dyn ClusterServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::PATCH => serve_update(call, |r| server.update(r)).await,
            Method::DELETE => serve_delete(call, |r| server.delete(r)).await,
            _ => send_method_not_allowed(call),
        },
        ["status", rest @ ..] => match server.status() {
            Some(target) => dispatch_cluster_status(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["credentials", rest @ ..] => match server.credentials() {
            Some(target) => dispatch_credentials(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["logs", rest @ ..] => match server.logs() {
            Some(target) => dispatch_logs(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["groups", rest @ ..] => match server.groups() {
            Some(target) => dispatch_groups(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["identity_providers", rest @ ..] => match server.identity_providers() {
            Some(target) => dispatch_identity_providers(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["ingresses", rest @ ..] => match server.ingresses() {
            Some(target) => dispatch_ingresses(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["machine_pools", rest @ ..] => match server.machine_pools() {
            Some(target) => dispatch_machine_pools(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["upgrade_policies", rest @ ..] => match server.upgrade_policies() {
            Some(target) => dispatch_upgrade_policies(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["addons", rest @ ..] => match server.addons() {
            Some(target) => dispatch_addon_installations(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_cluster_status(
    server: &dyn ClusterStatusServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_credentials(
    server: &dyn CredentialsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_logs(server: &dyn LogsServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Log::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.log(id) {
            Some(target) => dispatch_log(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_log(server: &dyn LogServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_groups(server: &dyn GroupsServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Group::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.group(id) {
            Some(target) => dispatch_group(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_group(server: &dyn GroupServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            _ => send_method_not_allowed(call),
        },
        ["users", rest @ ..] => match server.users() {
            Some(target) => dispatch_users(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_users(server: &dyn UsersServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, User::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.user(id) {
            Some(target) => dispatch_user(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_user(server: &dyn UserServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::DELETE => serve_delete(call, |r| server.delete(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_identity_providers(
    server: &dyn IdentityProvidersServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, IdentityProvider::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.identity_provider(id) {
            Some(target) => dispatch_identity_provider(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_identity_provider(
    server: &dyn IdentityProviderServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::DELETE => serve_delete(call, |r| server.delete(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_ingresses(
    server: &dyn IngressesServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Ingress::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.ingress(id) {
            Some(target) => dispatch_ingress(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_ingress(server: &dyn IngressServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::PATCH => serve_update(call, |r| server.update(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_machine_pools(
    server: &dyn MachinePoolsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, MachinePool::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.machine_pool(id) {
            Some(target) => dispatch_machine_pool(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_machine_pool(
    server: &dyn MachinePoolServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::PATCH => serve_update(call, |r| server.update(r)).await,
            Method::DELETE => serve_delete(call, |r| server.delete(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_upgrade_policies(
    server: &dyn UpgradePoliciesServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, UpgradePolicy::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.upgrade_policy(id) {
            Some(target) => dispatch_upgrade_policy(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_upgrade_policy(
    server: &dyn UpgradePolicyServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::PATCH => serve_update(call, |r| server.update(r)).await,
            Method::DELETE => serve_delete(call, |r| server.delete(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_addon_installations(
    server: &dyn AddOnInstallationsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => {
                serve_list(call, AddOnInstallation::LIST_KIND, |r| server.list(r)).await
            }
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.addon_installation(id) {
            Some(target) => dispatch_addon_installation(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_addon_installation(
    server: &dyn AddOnInstallationServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::DELETE => serve_delete(call, |r| server.delete(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_flavours(server: &dyn FlavoursServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Flavour::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.flavour(id) {
            Some(target) => dispatch_flavour(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_flavour(server: &dyn FlavourServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::PATCH => serve_update(call, |r| server.update(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_cloud_providers(
    server: &dyn CloudProvidersServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, CloudProvider::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.cloud_provider(id) {
            Some(target) => dispatch_cloud_provider(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_cloud_provider(
    server: &dyn CloudProviderServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            _ => send_method_not_allowed(call),
        },
        ["regions", rest @ ..] => match server.regions() {
            Some(target) => dispatch_cloud_regions(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_cloud_regions(
    server: &dyn CloudRegionsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, CloudRegion::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.region(id) {
            Some(target) => dispatch_cloud_region(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_cloud_region(
    server: &dyn CloudRegionServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_versions(server: &dyn VersionsServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Version::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.version(id) {
            Some(target) => dispatch_version(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_version(server: &dyn VersionServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_addons(server: &dyn AddOnsServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, AddOn::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.addon(id) {
            Some(target) => dispatch_addon(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_addon(server: &dyn AddOnServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::PATCH => serve_update(call, |r| server.update(r)).await,
            Method::DELETE => serve_delete(call, |r| server.delete(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_machine_types(
    server: &dyn MachineTypesServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, MachineType::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}
