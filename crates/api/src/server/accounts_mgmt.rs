//! Server tree of the accounts management service, mounted at
//! `/api/accounts_mgmt/v1`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::Method;
use axum::response::Response;
use ocm_accountsmgmt::{
    Account, ClusterAuthorizationRequest, ClusterAuthorizationResponse, Organization, Permission,
    QuotaSummary, Registry, RegistryCredential, ResourceQuota, Role, RoleBinding, Subscription,
};
use ocm_core::Class;

use super::serve::{serve_add, serve_delete, serve_get, serve_list, serve_post, serve_update};
use super::{
    AddServerRequest, AddServerResponse, Call, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse, PostServerRequest,
    PostServerResponse, UpdateServerRequest, UpdateServerResponse,
};
use crate::app::errors::{send_method_not_allowed, send_not_found};

type Handled<T> = anyhow::Result<T>;

/// List kind of quota summaries, which have no kind of their own.
pub const QUOTA_SUMMARY_LIST_KIND: &str = "QuotaSummaryList";

/// Root of the accounts management service.
pub trait AccountsMgmtServer: Send + Sync {
    fn accounts(&self) -> Option<Arc<dyn AccountsServer>> {
        None
    }

    /// Account of the user that sends the request.
    fn current_account(&self) -> Option<Arc<dyn CurrentAccountServer>> {
        None
    }

    fn organizations(&self) -> Option<Arc<dyn OrganizationsServer>> {
        None
    }

    fn subscriptions(&self) -> Option<Arc<dyn SubscriptionsServer>> {
        None
    }

    fn registries(&self) -> Option<Arc<dyn RegistriesServer>> {
        None
    }

    fn registry_credentials(&self) -> Option<Arc<dyn RegistryCredentialsServer>> {
        None
    }

    fn roles(&self) -> Option<Arc<dyn RolesServer>> {
        None
    }

    fn role_bindings(&self) -> Option<Arc<dyn RoleBindingsServer>> {
        None
    }

    fn permissions(&self) -> Option<Arc<dyn PermissionsServer>> {
        None
    }

    fn cluster_authorizations(&self) -> Option<Arc<dyn ClusterAuthorizationsServer>> {
        None
    }
}

#[async_trait]
pub trait AccountsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Account>>;

    async fn add(&self, request: AddServerRequest<Account>) -> Handled<AddServerResponse<Account>>;

    fn account(&self, _id: &str) -> Option<Arc<dyn AccountServer>> {
        None
    }
}

#[async_trait]
pub trait AccountServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Account>>;

    async fn update(
        &self,
        request: UpdateServerRequest<Account>,
    ) -> Handled<UpdateServerResponse<Account>>;
}

#[async_trait]
pub trait CurrentAccountServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Account>>;
}

#[async_trait]
pub trait OrganizationsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Organization>>;

    async fn add(
        &self,
        request: AddServerRequest<Organization>,
    ) -> Handled<AddServerResponse<Organization>>;

    fn organization(&self, _id: &str) -> Option<Arc<dyn OrganizationServer>> {
        None
    }
}

#[async_trait]
pub trait OrganizationServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Organization>>;

    async fn update(
        &self,
        request: UpdateServerRequest<Organization>,
    ) -> Handled<UpdateServerResponse<Organization>>;

    fn quota_summary(&self) -> Option<Arc<dyn QuotaSummaryServer>> {
        None
    }

    fn resource_quota(&self) -> Option<Arc<dyn ResourceQuotasServer>> {
        None
    }
}

/// Allowed and reserved quota of an organization, one item per resource.
#[async_trait]
pub trait QuotaSummaryServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<QuotaSummary>>;
}

#[async_trait]
pub trait ResourceQuotasServer: Send + Sync {
    async fn list(&self, request: ListServerRequest)
    -> Handled<ListServerResponse<ResourceQuota>>;

    async fn add(
        &self,
        request: AddServerRequest<ResourceQuota>,
    ) -> Handled<AddServerResponse<ResourceQuota>>;

    fn resource_quota(&self, _id: &str) -> Option<Arc<dyn ResourceQuotaServer>> {
        None
    }
}

#[async_trait]
pub trait ResourceQuotaServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<ResourceQuota>>;

    async fn update(
        &self,
        request: UpdateServerRequest<ResourceQuota>,
    ) -> Handled<UpdateServerResponse<ResourceQuota>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait SubscriptionsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Subscription>>;

    fn subscription(&self, _id: &str) -> Option<Arc<dyn SubscriptionServer>> {
        None
    }
}

#[async_trait]
pub trait SubscriptionServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Subscription>>;

    async fn update(
        &self,
        request: UpdateServerRequest<Subscription>,
    ) -> Handled<UpdateServerResponse<Subscription>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait RegistriesServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Registry>>;

    fn registry(&self, _id: &str) -> Option<Arc<dyn RegistryServer>> {
        None
    }
}

#[async_trait]
pub trait RegistryServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Registry>>;
}

#[async_trait]
pub trait RegistryCredentialsServer: Send + Sync {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> Handled<ListServerResponse<RegistryCredential>>;

    async fn add(
        &self,
        request: AddServerRequest<RegistryCredential>,
    ) -> Handled<AddServerResponse<RegistryCredential>>;

    fn registry_credential(&self, _id: &str) -> Option<Arc<dyn RegistryCredentialServer>> {
        None
    }
}

#[async_trait]
pub trait RegistryCredentialServer: Send + Sync {
    async fn get(
        &self,
        request: GetServerRequest,
    ) -> Handled<GetServerResponse<RegistryCredential>>;
}

#[async_trait]
pub trait RolesServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Role>>;

    async fn add(&self, request: AddServerRequest<Role>) -> Handled<AddServerResponse<Role>>;

    fn role(&self, _id: &str) -> Option<Arc<dyn RoleServer>> {
        None
    }
}

#[async_trait]
pub trait RoleServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Role>>;

    async fn update(&self, request: UpdateServerRequest<Role>) -> Handled<UpdateServerResponse<Role>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait RoleBindingsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<RoleBinding>>;

    async fn add(
        &self,
        request: AddServerRequest<RoleBinding>,
    ) -> Handled<AddServerResponse<RoleBinding>>;

    fn role_binding(&self, _id: &str) -> Option<Arc<dyn RoleBindingServer>> {
        None
    }
}

#[async_trait]
pub trait RoleBindingServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<RoleBinding>>;

    async fn update(
        &self,
        request: UpdateServerRequest<RoleBinding>,
    ) -> Handled<UpdateServerResponse<RoleBinding>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

#[async_trait]
pub trait PermissionsServer: Send + Sync {
    async fn list(&self, request: ListServerRequest) -> Handled<ListServerResponse<Permission>>;

    async fn add(
        &self,
        request: AddServerRequest<Permission>,
    ) -> Handled<AddServerResponse<Permission>>;

    fn permission(&self, _id: &str) -> Option<Arc<dyn PermissionServer>> {
        None
    }
}

#[async_trait]
pub trait PermissionServer: Send + Sync {
    async fn get(&self, request: GetServerRequest) -> Handled<GetServerResponse<Permission>>;

    async fn delete(&self, request: DeleteServerRequest) -> Handled<DeleteServerResponse>;
}

/// Checks, and optionally reserves, the quota needed to create a cluster.
#[async_trait]
pub trait ClusterAuthorizationsServer: Send + Sync {
    async fn post(
        &self,
        request: PostServerRequest<ClusterAuthorizationRequest>,
    ) -> Handled<PostServerResponse<ClusterAuthorizationResponse>>;
}

pub async fn dispatch_accounts_mgmt(
    server: &dyn AccountsMgmtServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => send_method_not_allowed(call),
        ["accounts", rest @ ..] => match server.accounts() {
            Some(target) => dispatch_accounts(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["current_account", rest @ ..] => match server.current_account() {
            Some(target) => dispatch_current_account(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["organizations", rest @ ..] => match server.organizations() {
            Some(target) => dispatch_organizations(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["subscriptions", rest @ ..] => match server.subscriptions() {
            Some(target) => dispatch_subscriptions(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["registries", rest @ ..] => match server.registries() {
            Some(target) => dispatch_registries(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["registry_credentials", rest @ ..] => match server.registry_credentials() {
            Some(target) => dispatch_registry_credentials(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["roles", rest @ ..] => match server.roles() {
            Some(target) => dispatch_roles(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["role_bindings", rest @ ..] => match server.role_bindings() {
            Some(target) => dispatch_role_bindings(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["permissions", rest @ ..] => match server.permissions() {
            Some(target) => dispatch_permissions(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["cluster_authorizations", rest @ ..] => match server.cluster_authorizations() {
            Some(target) => dispatch_cluster_authorizations(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_accounts(server: &dyn AccountsServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Account::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.account(id) {
            Some(target) => dispatch_account(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_account(server: &dyn AccountServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::PATCH => serve_update(call, |r| server.update(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_current_account(
    server: &dyn CurrentAccountServer,
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

async fn dispatch_organizations(
    server: &dyn OrganizationsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Organization::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.organization(id) {
            Some(target) => dispatch_organization(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_organization(
    server: &dyn OrganizationServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            Method::PATCH => serve_update(call, |r| server.update(r)).await,
            _ => send_method_not_allowed(call),
        },
        ["quota_summary", rest @ ..] => match server.quota_summary() {
            Some(target) => dispatch_quota_summary(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        ["resource_quota", rest @ ..] => match server.resource_quota() {
            Some(target) => dispatch_resource_quotas(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_quota_summary(
    server: &dyn QuotaSummaryServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, QUOTA_SUMMARY_LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_resource_quotas(
    server: &dyn ResourceQuotasServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, ResourceQuota::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.resource_quota(id) {
            Some(target) => dispatch_resource_quota(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_resource_quota(
    server: &dyn ResourceQuotaServer,
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

async fn dispatch_subscriptions(
    server: &dyn SubscriptionsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Subscription::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.subscription(id) {
            Some(target) => dispatch_subscription(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_subscription(
    server: &dyn SubscriptionServer,
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

async fn dispatch_registries(
    server: &dyn RegistriesServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Registry::LIST_KIND, |r| server.list(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.registry(id) {
            Some(target) => dispatch_registry(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_registry(server: &dyn RegistryServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_get(call, |r| server.get(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}

async fn dispatch_registry_credentials(
    server: &dyn RegistryCredentialsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => {
                serve_list(call, RegistryCredential::LIST_KIND, |r| server.list(r)).await
            }
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.registry_credential(id) {
            Some(target) => dispatch_registry_credential(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_registry_credential(
    server: &dyn RegistryCredentialServer,
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

async fn dispatch_roles(server: &dyn RolesServer, call: &Call, segments: &[&str]) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Role::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.role(id) {
            Some(target) => dispatch_role(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_role(server: &dyn RoleServer, call: &Call, segments: &[&str]) -> Response {
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

async fn dispatch_role_bindings(
    server: &dyn RoleBindingsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, RoleBinding::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.role_binding(id) {
            Some(target) => dispatch_role_binding(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_role_binding(
    server: &dyn RoleBindingServer,
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

async fn dispatch_permissions(
    server: &dyn PermissionsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::GET => serve_list(call, Permission::LIST_KIND, |r| server.list(r)).await,
            Method::POST => serve_add(call, |r| server.add(r)).await,
            _ => send_method_not_allowed(call),
        },
        [id, rest @ ..] => match server.permission(id) {
            Some(target) => dispatch_permission(target.as_ref(), call, rest).await,
            None => send_not_found(call),
        },
    }
}

async fn dispatch_permission(
    server: &dyn PermissionServer,
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

async fn dispatch_cluster_authorizations(
    server: &dyn ClusterAuthorizationsServer,
    call: &Call,
    segments: &[&str],
) -> Response {
    match segments {
        [] => match *call.method() {
            Method::POST => serve_post(call, |r| server.post(r)).await,
            _ => send_method_not_allowed(call),
        },
        _ => send_not_found(call),
    }
}
