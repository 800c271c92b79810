//! Clients of the accounts management service (`/api/accounts_mgmt/v1`).

use ocm_accountsmgmt::{
    Account, ClusterAuthorizationRequest, ClusterAuthorizationResponse, Organization, Permission,
    QuotaSummary, Registry, RegistryCredential, ResourceQuota, Role, RoleBinding, Subscription,
};

use crate::request::{
    AddRequest, DeleteRequest, GetRequest, ListRequest, PostRequest, UpdateRequest,
};
use crate::resource::resource_client;

resource_client!(
    /// Root of the accounts management service.
    AccountsMgmtClient
);

impl AccountsMgmtClient {
    pub fn accounts(&self) -> AccountsClient {
        AccountsClient::new(self.0.child("accounts"))
    }

    /// Account of the user that owns the token of the connection.
    pub fn current_account(&self) -> CurrentAccountClient {
        CurrentAccountClient::new(self.0.child("current_account"))
    }

    pub fn organizations(&self) -> OrganizationsClient {
        OrganizationsClient::new(self.0.child("organizations"))
    }

    pub fn subscriptions(&self) -> SubscriptionsClient {
        SubscriptionsClient::new(self.0.child("subscriptions"))
    }

    pub fn registries(&self) -> RegistriesClient {
        RegistriesClient::new(self.0.child("registries"))
    }

    pub fn registry_credentials(&self) -> RegistryCredentialsClient {
        RegistryCredentialsClient::new(self.0.child("registry_credentials"))
    }

    pub fn roles(&self) -> RolesClient {
        RolesClient::new(self.0.child("roles"))
    }

    pub fn role_bindings(&self) -> RoleBindingsClient {
        RoleBindingsClient::new(self.0.child("role_bindings"))
    }

    pub fn permissions(&self) -> PermissionsClient {
        PermissionsClient::new(self.0.child("permissions"))
    }

    pub fn cluster_authorizations(&self) -> ClusterAuthorizationsClient {
        ClusterAuthorizationsClient::new(self.0.child("cluster_authorizations"))
    }
}

resource_client!(AccountsClient);

impl AccountsClient {
    pub fn list(&self) -> ListRequest<Account> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<Account> {
        self.0.add()
    }

    pub fn account(&self, id: &str) -> AccountClient {
        AccountClient::new(self.0.item(id))
    }
}

resource_client!(AccountClient);

impl AccountClient {
    pub fn get(&self) -> GetRequest<Account> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<Account> {
        self.0.update()
    }
}

resource_client!(CurrentAccountClient);

impl CurrentAccountClient {
    pub fn get(&self) -> GetRequest<Account> {
        self.0.get()
    }
}

resource_client!(OrganizationsClient);

impl OrganizationsClient {
    pub fn list(&self) -> ListRequest<Organization> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<Organization> {
        self.0.add()
    }

    pub fn organization(&self, id: &str) -> OrganizationClient {
        OrganizationClient::new(self.0.item(id))
    }
}

resource_client!(OrganizationClient);

impl OrganizationClient {
    pub fn get(&self) -> GetRequest<Organization> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<Organization> {
        self.0.update()
    }

    pub fn quota_summary(&self) -> QuotaSummaryClient {
        QuotaSummaryClient::new(self.0.child("quota_summary"))
    }

    pub fn resource_quota(&self) -> ResourceQuotasClient {
        ResourceQuotasClient::new(self.0.child("resource_quota"))
    }
}

resource_client!(QuotaSummaryClient);

impl QuotaSummaryClient {
    pub fn list(&self) -> ListRequest<QuotaSummary> {
        self.0.list()
    }
}

resource_client!(ResourceQuotasClient);

impl ResourceQuotasClient {
    pub fn list(&self) -> ListRequest<ResourceQuota> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<ResourceQuota> {
        self.0.add()
    }

    pub fn resource_quota(&self, id: &str) -> ResourceQuotaClient {
        ResourceQuotaClient::new(self.0.item(id))
    }
}

resource_client!(ResourceQuotaClient);

impl ResourceQuotaClient {
    pub fn get(&self) -> GetRequest<ResourceQuota> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<ResourceQuota> {
        self.0.update()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(SubscriptionsClient);

impl SubscriptionsClient {
    pub fn list(&self) -> ListRequest<Subscription> {
        self.0.list()
    }

    pub fn subscription(&self, id: &str) -> SubscriptionClient {
        SubscriptionClient::new(self.0.item(id))
    }
}

resource_client!(SubscriptionClient);

impl SubscriptionClient {
    pub fn get(&self) -> GetRequest<Subscription> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<Subscription> {
        self.0.update()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(RegistriesClient);

impl RegistriesClient {
    pub fn list(&self) -> ListRequest<Registry> {
        self.0.list()
    }

    pub fn registry(&self, id: &str) -> RegistryClient {
        RegistryClient::new(self.0.item(id))
    }
}

resource_client!(RegistryClient);

impl RegistryClient {
    pub fn get(&self) -> GetRequest<Registry> {
        self.0.get()
    }
}

resource_client!(RegistryCredentialsClient);

impl RegistryCredentialsClient {
    pub fn list(&self) -> ListRequest<RegistryCredential> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<RegistryCredential> {
        self.0.add()
    }

    pub fn registry_credential(&self, id: &str) -> RegistryCredentialClient {
        RegistryCredentialClient::new(self.0.item(id))
    }
}

resource_client!(RegistryCredentialClient);

impl RegistryCredentialClient {
    pub fn get(&self) -> GetRequest<RegistryCredential> {
        self.0.get()
    }
}

resource_client!(RolesClient);

impl RolesClient {
    pub fn list(&self) -> ListRequest<Role> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<Role> {
        self.0.add()
    }

    pub fn role(&self, id: &str) -> RoleClient {
        RoleClient::new(self.0.item(id))
    }
}

resource_client!(RoleClient);

impl RoleClient {
    pub fn get(&self) -> GetRequest<Role> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<Role> {
        self.0.update()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(RoleBindingsClient);

impl RoleBindingsClient {
    pub fn list(&self) -> ListRequest<RoleBinding> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<RoleBinding> {
        self.0.add()
    }

    pub fn role_binding(&self, id: &str) -> RoleBindingClient {
        RoleBindingClient::new(self.0.item(id))
    }
}

resource_client!(RoleBindingClient);

impl RoleBindingClient {
    pub fn get(&self) -> GetRequest<RoleBinding> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<RoleBinding> {
        self.0.update()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(PermissionsClient);

impl PermissionsClient {
    pub fn list(&self) -> ListRequest<Permission> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<Permission> {
        self.0.add()
    }

    pub fn permission(&self, id: &str) -> PermissionClient {
        PermissionClient::new(self.0.item(id))
    }
}

resource_client!(PermissionClient);

impl PermissionClient {
    pub fn get(&self) -> GetRequest<Permission> {
        self.0.get()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(
    /// Checks whether an account may create a cluster and reserves the quota.
    ClusterAuthorizationsClient
);

impl ClusterAuthorizationsClient {
    pub fn post(&self) -> PostRequest<ClusterAuthorizationRequest, ClusterAuthorizationResponse> {
        self.0.post()
    }
}
