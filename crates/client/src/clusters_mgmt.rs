//! Clients of the clusters management service (`/api/clusters_mgmt/v1`).

use ocm_clustersmgmt::{
    AddOn, AddOnInstallation, CloudProvider, CloudRegion, Cluster, ClusterCredentials,
    ClusterStatus, Flavour, Group, IdentityProvider, Ingress, Log, MachinePool, MachineType, User,
    UpgradePolicy, Version,
};

use crate::request::{AddRequest, DeleteRequest, GetRequest, ListRequest, UpdateRequest};
use crate::resource::resource_client;

resource_client!(
    /// Root of the clusters management service.
    ClustersMgmtClient
);

impl ClustersMgmtClient {
    pub fn clusters(&self) -> ClustersClient {
        ClustersClient::new(self.0.child("clusters"))
    }

    pub fn flavours(&self) -> FlavoursClient {
        FlavoursClient::new(self.0.child("flavours"))
    }

    pub fn cloud_providers(&self) -> CloudProvidersClient {
        CloudProvidersClient::new(self.0.child("cloud_providers"))
    }

    pub fn versions(&self) -> VersionsClient {
        VersionsClient::new(self.0.child("versions"))
    }

    pub fn addons(&self) -> AddOnsClient {
        AddOnsClient::new(self.0.child("addons"))
    }

    pub fn machine_types(&self) -> MachineTypesClient {
        MachineTypesClient::new(self.0.child("machine_types"))
    }
}

resource_client!(ClustersClient);

impl ClustersClient {
    pub fn list(&self) -> ListRequest<Cluster> {
        self.0.list()
    }

    /// Provisions a new cluster.
    pub fn add(&self) -> AddRequest<Cluster> {
        self.0.add()
    }

    pub fn cluster(&self, id: &str) -> ClusterClient {
        ClusterClient::new(self.0.item(id))
    }
}

resource_client!(ClusterClient);

impl ClusterClient {
    pub fn get(&self) -> GetRequest<Cluster> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<Cluster> {
        self.0.update()
    }

    /// Deprovisions the cluster.
    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }

    pub fn status(&self) -> ClusterStatusClient {
        ClusterStatusClient::new(self.0.child("status"))
    }

    pub fn credentials(&self) -> CredentialsClient {
        CredentialsClient::new(self.0.child("credentials"))
    }

    pub fn logs(&self) -> LogsClient {
        LogsClient::new(self.0.child("logs"))
    }

    pub fn groups(&self) -> GroupsClient {
        GroupsClient::new(self.0.child("groups"))
    }

    pub fn identity_providers(&self) -> IdentityProvidersClient {
        IdentityProvidersClient::new(self.0.child("identity_providers"))
    }

    pub fn ingresses(&self) -> IngressesClient {
        IngressesClient::new(self.0.child("ingresses"))
    }

    pub fn machine_pools(&self) -> MachinePoolsClient {
        MachinePoolsClient::new(self.0.child("machine_pools"))
    }

    pub fn upgrade_policies(&self) -> UpgradePoliciesClient {
        UpgradePoliciesClient::new(self.0.child("upgrade_policies"))
    }

    /// Add-ons installed in the cluster.
    pub fn addons(&self) -> AddOnInstallationsClient {
        AddOnInstallationsClient::new(self.0.child("addons"))
    }
}

resource_client!(ClusterStatusClient);

impl ClusterStatusClient {
    pub fn get(&self) -> GetRequest<ClusterStatus> {
        self.0.get()
    }
}

resource_client!(CredentialsClient);

impl CredentialsClient {
    pub fn get(&self) -> GetRequest<ClusterCredentials> {
        self.0.get()
    }
}

resource_client!(LogsClient);

impl LogsClient {
    pub fn list(&self) -> ListRequest<Log> {
        self.0.list()
    }

    pub fn log(&self, id: &str) -> LogClient {
        LogClient::new(self.0.item(id))
    }
}

resource_client!(LogClient);

impl LogClient {
    pub fn get(&self) -> GetRequest<Log> {
        self.0.get()
    }
}

resource_client!(GroupsClient);

impl GroupsClient {
    pub fn list(&self) -> ListRequest<Group> {
        self.0.list()
    }

    pub fn group(&self, id: &str) -> GroupClient {
        GroupClient::new(self.0.item(id))
    }
}

resource_client!(GroupClient);

impl GroupClient {
    pub fn get(&self) -> GetRequest<Group> {
        self.0.get()
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.0.child("users"))
    }
}

resource_client!(UsersClient);

impl UsersClient {
    pub fn list(&self) -> ListRequest<User> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<User> {
        self.0.add()
    }

    pub fn user(&self, id: &str) -> UserClient {
        UserClient::new(self.0.item(id))
    }
}

resource_client!(UserClient);

impl UserClient {
    pub fn get(&self) -> GetRequest<User> {
        self.0.get()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(IdentityProvidersClient);

impl IdentityProvidersClient {
    pub fn list(&self) -> ListRequest<IdentityProvider> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<IdentityProvider> {
        self.0.add()
    }

    pub fn identity_provider(&self, id: &str) -> IdentityProviderClient {
        IdentityProviderClient::new(self.0.item(id))
    }
}

resource_client!(IdentityProviderClient);

impl IdentityProviderClient {
    pub fn get(&self) -> GetRequest<IdentityProvider> {
        self.0.get()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(IngressesClient);

impl IngressesClient {
    pub fn list(&self) -> ListRequest<Ingress> {
        self.0.list()
    }

    pub fn ingress(&self, id: &str) -> IngressClient {
        IngressClient::new(self.0.item(id))
    }
}

resource_client!(IngressClient);

impl IngressClient {
    pub fn get(&self) -> GetRequest<Ingress> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<Ingress> {
        self.0.update()
    }
}

resource_client!(MachinePoolsClient);

impl MachinePoolsClient {
    pub fn list(&self) -> ListRequest<MachinePool> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<MachinePool> {
        self.0.add()
    }

    pub fn machine_pool(&self, id: &str) -> MachinePoolClient {
        MachinePoolClient::new(self.0.item(id))
    }
}

resource_client!(MachinePoolClient);

impl MachinePoolClient {
    pub fn get(&self) -> GetRequest<MachinePool> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<MachinePool> {
        self.0.update()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(UpgradePoliciesClient);

impl UpgradePoliciesClient {
    pub fn list(&self) -> ListRequest<UpgradePolicy> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<UpgradePolicy> {
        self.0.add()
    }

    pub fn upgrade_policy(&self, id: &str) -> UpgradePolicyClient {
        UpgradePolicyClient::new(self.0.item(id))
    }
}

resource_client!(UpgradePolicyClient);

impl UpgradePolicyClient {
    pub fn get(&self) -> GetRequest<UpgradePolicy> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<UpgradePolicy> {
        self.0.update()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(AddOnInstallationsClient);

impl AddOnInstallationsClient {
    pub fn list(&self) -> ListRequest<AddOnInstallation> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<AddOnInstallation> {
        self.0.add()
    }

    pub fn addon(&self, id: &str) -> AddOnInstallationClient {
        AddOnInstallationClient::new(self.0.item(id))
    }
}

resource_client!(AddOnInstallationClient);

impl AddOnInstallationClient {
    pub fn get(&self) -> GetRequest<AddOnInstallation> {
        self.0.get()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(FlavoursClient);

impl FlavoursClient {
    pub fn list(&self) -> ListRequest<Flavour> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<Flavour> {
        self.0.add()
    }

    pub fn flavour(&self, id: &str) -> FlavourClient {
        FlavourClient::new(self.0.item(id))
    }
}

resource_client!(FlavourClient);

impl FlavourClient {
    pub fn get(&self) -> GetRequest<Flavour> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<Flavour> {
        self.0.update()
    }
}

resource_client!(CloudProvidersClient);

impl CloudProvidersClient {
    pub fn list(&self) -> ListRequest<CloudProvider> {
        self.0.list()
    }

    pub fn cloud_provider(&self, id: &str) -> CloudProviderClient {
        CloudProviderClient::new(self.0.item(id))
    }
}

resource_client!(CloudProviderClient);

impl CloudProviderClient {
    pub fn get(&self) -> GetRequest<CloudProvider> {
        self.0.get()
    }

    pub fn regions(&self) -> CloudRegionsClient {
        CloudRegionsClient::new(self.0.child("regions"))
    }
}

resource_client!(CloudRegionsClient);

impl CloudRegionsClient {
    pub fn list(&self) -> ListRequest<CloudRegion> {
        self.0.list()
    }

    pub fn region(&self, id: &str) -> CloudRegionClient {
        CloudRegionClient::new(self.0.item(id))
    }
}

resource_client!(CloudRegionClient);

impl CloudRegionClient {
    pub fn get(&self) -> GetRequest<CloudRegion> {
        self.0.get()
    }
}

resource_client!(VersionsClient);

impl VersionsClient {
    pub fn list(&self) -> ListRequest<Version> {
        self.0.list()
    }

    pub fn version(&self, id: &str) -> VersionClient {
        VersionClient::new(self.0.item(id))
    }
}

resource_client!(VersionClient);

impl VersionClient {
    pub fn get(&self) -> GetRequest<Version> {
        self.0.get()
    }
}

resource_client!(AddOnsClient);

impl AddOnsClient {
    pub fn list(&self) -> ListRequest<AddOn> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<AddOn> {
        self.0.add()
    }

    pub fn addon(&self, id: &str) -> AddOnClient {
        AddOnClient::new(self.0.item(id))
    }
}

resource_client!(AddOnClient);

impl AddOnClient {
    pub fn get(&self) -> GetRequest<AddOn> {
        self.0.get()
    }

    pub fn update(&self) -> UpdateRequest<AddOn> {
        self.0.update()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}

resource_client!(MachineTypesClient);

impl MachineTypesClient {
    pub fn list(&self) -> ListRequest<MachineType> {
        self.0.list()
    }
}

#[cfg(test)]
mod tests {
    use crate::Connection;

    #[test]
    fn paths_follow_the_resource_tree() {
        let connection = Connection::builder().client("id", "secret").build().unwrap();
        let cluster = connection.clusters_mgmt().clusters().cluster("123");
        assert_eq!(cluster.path(), "/api/clusters_mgmt/v1/clusters/123");
        assert_eq!(
            cluster.groups().group("dedicated-admins").users().user("alice").path(),
            "/api/clusters_mgmt/v1/clusters/123/groups/dedicated-admins/users/alice"
        );
        assert_eq!(
            connection.clusters_mgmt().cloud_providers().cloud_provider("aws").regions().path(),
            "/api/clusters_mgmt/v1/cloud_providers/aws/regions"
        );
        assert_eq!(cluster.addons().addon("logging").path(), "/api/clusters_mgmt/v1/clusters/123/addons/logging");
    }
}
