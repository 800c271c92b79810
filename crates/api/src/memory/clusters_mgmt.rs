use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use ocm_clustersmgmt::{
    AddOn, AddOnInstallMode, AddOnInstallation, CloudProvider, CloudRegion, Cluster, ClusterState,
    ClusterStatus, Flavour, FlavourNodes, Group, IdentityProvider, MachinePool, MachineType,
    MachineTypeCategory, Network, UpgradePolicy, User, Value, Version,
};

use super::{Collection, Item, Store, missing_attribute};
use crate::server::clusters_mgmt::{
    AddOnInstallationServer, AddOnInstallationsServer, AddOnServer, AddOnsServer,
    CloudProviderServer, CloudProvidersServer, CloudRegionServer, CloudRegionsServer,
    ClusterServer, ClusterStatusServer, ClustersMgmtServer, ClustersServer, FlavourServer,
    FlavoursServer, GroupServer, GroupsServer, IdentityProviderServer, IdentityProvidersServer,
    MachinePoolServer, MachinePoolsServer, MachineTypesServer, UpgradePoliciesServer,
    UpgradePolicyServer, UserServer, UsersServer, VersionServer, VersionsServer,
};
use crate::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse,
    UpdateServerRequest, UpdateServerResponse,
};

const ROOT: &str = "/api/clusters_mgmt/v1";

/// Groups created with every cluster.
const CLUSTER_GROUPS: [&str; 2] = ["cluster-admins", "dedicated-admins"];

/// Clusters management service backed by memory.
pub struct MemoryClustersMgmt {
    clusters: Arc<MemoryClusters>,
    flavours: Arc<Store<Flavour>>,
    versions: Arc<Store<Version>>,
    cloud_providers: Arc<MemoryCloudProviders>,
    addons: Arc<Store<AddOn>>,
    machine_types: Arc<Store<MachineType>>,
}

impl MemoryClustersMgmt {
    pub fn new() -> Self {
        Self {
            clusters: Arc::new(MemoryClusters::new()),
            flavours: Arc::new(Store::new(format!("{ROOT}/flavours"))),
            versions: Arc::new(Store::new(format!("{ROOT}/versions"))),
            cloud_providers: Arc::new(MemoryCloudProviders::new()),
            addons: Arc::new(Store::new(format!("{ROOT}/addons"))),
            machine_types: Arc::new(Store::new(format!("{ROOT}/machine_types"))),
        }
    }

    /// Service with the catalog of a typical installation: AWS and GCP with a
    /// few regions, one flavour, two versions and two machine types.
    pub fn seeded() -> Self {
        let service = Self::new();

        let aws = service.cloud_providers.put(
            CloudProvider::builder()
                .id("aws")
                .name("aws")
                .display_name("AWS")
                .build(),
        );
        for (id, name, multi_az) in [
            ("us-east-1", "US East, N. Virginia", true),
            ("us-west-2", "US West, Oregon", true),
        ] {
            service.cloud_providers.put_region(&aws, region(id, name, multi_az));
        }
        let gcp = service.cloud_providers.put(
            CloudProvider::builder()
                .id("gcp")
                .name("gcp")
                .display_name("GCP")
                .build(),
        );
        for (id, name, multi_az) in [
            ("us-east1", "US East, South Carolina", true),
            ("europe-west1", "Europe West, Belgium", false),
        ] {
            service.cloud_providers.put_region(&gcp, region(id, name, multi_az));
        }

        service.flavours.put(
            Flavour::builder()
                .id("osd-4")
                .name("osd-4")
                .nodes(FlavourNodes::builder().master(3))
                .network(
                    Network::builder()
                        .machine_cidr("10.0.0.0/16")
                        .service_cidr("172.30.0.0/16")
                        .pod_cidr("10.128.0.0/14")
                        .host_prefix(23),
                )
                .build(),
        );

        service.versions.put(
            Version::builder()
                .id("openshift-v4.6.1")
                .raw_id("4.6.1")
                .channel_group("stable")
                .enabled(true)
                .available_upgrades(vec!["4.6.2".to_string()])
                .build(),
        );
        service.versions.put(
            Version::builder()
                .id("openshift-v4.6.2")
                .raw_id("4.6.2")
                .channel_group("stable")
                .enabled(true)
                .default_(true)
                .build(),
        );

        for (id, category, cpu, memory) in [
            ("m5.xlarge", MachineTypeCategory::GeneralPurpose, 4.0, 16.0),
            ("r5.xlarge", MachineTypeCategory::MemoryOptimized, 4.0, 32.0),
        ] {
            service.machine_types.put(
                MachineType::builder()
                    .id(id)
                    .name(id)
                    .category(category)
                    .cloud_provider(CloudProvider::builder().id("aws").link(true))
                    .cpu(Value::builder().value(cpu).unit("vCPU"))
                    .memory(Value::builder().value(memory).unit("GiB"))
                    .build(),
            );
        }

        service.addons.put(
            AddOn::builder()
                .id("cluster-logging-operator")
                .name("Cluster Logging Operator")
                .enabled(true)
                .install_mode(AddOnInstallMode::OwnNamespace)
                .target_namespace("openshift-logging")
                .resource_cost(1.0)
                .build(),
        );

        service
    }
}

impl Default for MemoryClustersMgmt {
    fn default() -> Self {
        Self::new()
    }
}

impl ClustersMgmtServer for MemoryClustersMgmt {
    fn clusters(&self) -> Option<Arc<dyn ClustersServer>> {
        Some(self.clusters.clone())
    }

    fn flavours(&self) -> Option<Arc<dyn FlavoursServer>> {
        Some(Collection::new(&self.flavours))
    }

    fn cloud_providers(&self) -> Option<Arc<dyn CloudProvidersServer>> {
        Some(self.cloud_providers.clone())
    }

    fn versions(&self) -> Option<Arc<dyn VersionsServer>> {
        Some(Collection::new(&self.versions))
    }

    fn addons(&self) -> Option<Arc<dyn AddOnsServer>> {
        Some(Collection::new(&self.addons))
    }

    fn machine_types(&self) -> Option<Arc<dyn MachineTypesServer>> {
        Some(Collection::new(&self.machine_types))
    }
}

fn region(id: &str, display_name: &str, multi_az: bool) -> CloudRegion {
    CloudRegion::builder()
        .id(id)
        .name(id)
        .display_name(display_name)
        .enabled(true)
        .supports_multi_az(multi_az)
        .build()
}

struct MemoryCloudProviders {
    providers: Arc<Store<CloudProvider>>,
    regions: RwLock<BTreeMap<String, Arc<Store<CloudRegion>>>>,
}

impl MemoryCloudProviders {
    fn new() -> Self {
        Self {
            providers: Arc::new(Store::new(format!("{ROOT}/cloud_providers"))),
            regions: RwLock::new(BTreeMap::new()),
        }
    }

    fn put(&self, provider: CloudProvider) -> CloudProvider {
        let provider = self.providers.put(provider);
        let id = provider.id().unwrap_or_default().to_string();
        let regions = Store::new(format!("{}/regions", self.providers.href(&id)));
        self.regions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id)
            .or_insert_with(|| Arc::new(regions));
        provider
    }

    fn put_region(&self, provider: &CloudProvider, region: CloudRegion) {
        let link = CloudProvider::builder()
            .id(provider.id().unwrap_or_default())
            .href(provider.href().unwrap_or_default())
            .link(true);
        if let Some(store) = self.regions_of(provider.id().unwrap_or_default()) {
            store.put(region.to_builder().cloud_provider(link).build());
        }
    }

    fn regions_of(&self, id: &str) -> Option<Arc<Store<CloudRegion>>> {
        self.regions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }
}

#[async_trait]
impl CloudProvidersServer for MemoryCloudProviders {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<CloudProvider>> {
        Ok(self.providers.page(&request))
    }

    fn cloud_provider(&self, id: &str) -> Option<Arc<dyn CloudProviderServer>> {
        let regions = self.regions_of(id)?;
        let provider = Collection(Arc::clone(&self.providers)).locate(id)?;
        Some(Arc::new(CloudProviderItem { provider, regions }))
    }
}

struct CloudProviderItem {
    provider: Arc<Item<CloudProvider>>,
    regions: Arc<Store<CloudRegion>>,
}

#[async_trait]
impl CloudProviderServer for CloudProviderItem {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<CloudProvider>> {
        Ok(GetServerResponse::new(self.provider.get()?))
    }

    fn regions(&self) -> Option<Arc<dyn CloudRegionsServer>> {
        Some(Collection::new(&self.regions))
    }
}

#[async_trait]
impl CloudRegionsServer for Collection<CloudRegion> {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<CloudRegion>> {
        Ok(self.0.page(&request))
    }

    fn region(&self, id: &str) -> Option<Arc<dyn CloudRegionServer>> {
        self.locate(id).map(|item| item as Arc<dyn CloudRegionServer>)
    }
}

#[async_trait]
impl CloudRegionServer for Item<CloudRegion> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<CloudRegion>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }
}

#[async_trait]
impl FlavoursServer for Collection<Flavour> {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<Flavour>> {
        Ok(self.0.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<Flavour>,
    ) -> anyhow::Result<AddServerResponse<Flavour>> {
        Ok(AddServerResponse::new(self.0.add(request.into_body())?))
    }

    fn flavour(&self, id: &str) -> Option<Arc<dyn FlavourServer>> {
        self.locate(id).map(|item| item as Arc<dyn FlavourServer>)
    }
}

#[async_trait]
impl FlavourServer for Item<Flavour> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<Flavour>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<Flavour>,
    ) -> anyhow::Result<UpdateServerResponse<Flavour>> {
        Ok(UpdateServerResponse::new(Item::update(self, request.into_body())?))
    }
}

#[async_trait]
impl VersionsServer for Collection<Version> {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<Version>> {
        Ok(self.0.page(&request))
    }

    fn version(&self, id: &str) -> Option<Arc<dyn VersionServer>> {
        self.locate(id).map(|item| item as Arc<dyn VersionServer>)
    }
}

#[async_trait]
impl VersionServer for Item<Version> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<Version>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }
}

#[async_trait]
impl AddOnsServer for Collection<AddOn> {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<AddOn>> {
        Ok(self.0.page(&request))
    }

    async fn add(&self, request: AddServerRequest<AddOn>) -> anyhow::Result<AddServerResponse<AddOn>> {
        let addon = request.into_body();
        if addon.name().is_none() {
            return Err(missing_attribute(AddOn::KIND, "name").into());
        }
        Ok(AddServerResponse::new(self.0.add(addon)?))
    }

    fn addon(&self, id: &str) -> Option<Arc<dyn AddOnServer>> {
        self.locate(id).map(|item| item as Arc<dyn AddOnServer>)
    }
}

#[async_trait]
impl AddOnServer for Item<AddOn> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<AddOn>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<AddOn>,
    ) -> anyhow::Result<UpdateServerResponse<AddOn>> {
        Ok(UpdateServerResponse::new(Item::update(self, request.into_body())?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.remove()?;
        Ok(DeleteServerResponse::new())
    }
}

#[async_trait]
impl MachineTypesServer for Collection<MachineType> {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<MachineType>> {
        Ok(self.0.page(&request))
    }
}

/// Collections that belong to one cluster.
struct ClusterChildren {
    machine_pools: Arc<Store<MachinePool>>,
    upgrade_policies: Arc<Store<UpgradePolicy>>,
    addons: Arc<Store<AddOnInstallation>>,
    identity_providers: Arc<Store<IdentityProvider>>,
    groups: Arc<Store<Group>>,
    users: BTreeMap<String, Arc<Store<User>>>,
}

impl ClusterChildren {
    fn new(href: &str) -> Self {
        let groups = Arc::new(Store::new(format!("{href}/groups")));
        let mut users = BTreeMap::new();
        for name in CLUSTER_GROUPS {
            let group = groups.put(Group::builder().id(name).build());
            let users_path = format!("{}/users", group.href().unwrap_or_default());
            users.insert(name.to_string(), Arc::new(Store::new(users_path)));
        }
        Self {
            machine_pools: Arc::new(Store::new(format!("{href}/machine_pools"))),
            upgrade_policies: Arc::new(Store::new(format!("{href}/upgrade_policies"))),
            addons: Arc::new(Store::new(format!("{href}/addons"))),
            identity_providers: Arc::new(Store::new(format!("{href}/identity_providers"))),
            groups,
            users,
        }
    }
}

type Children = Arc<RwLock<BTreeMap<String, Arc<ClusterChildren>>>>;

struct MemoryClusters {
    store: Arc<Store<Cluster>>,
    children: Children,
}

impl MemoryClusters {
    fn new() -> Self {
        Self {
            store: Arc::new(Store::new(format!("{ROOT}/clusters"))),
            children: Arc::default(),
        }
    }
}

#[async_trait]
impl ClustersServer for MemoryClusters {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<Cluster>> {
        Ok(self.store.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<Cluster>,
    ) -> anyhow::Result<AddServerResponse<Cluster>> {
        let cluster = request.into_body();
        if cluster.name().is_none() {
            return Err(missing_attribute(Cluster::KIND, "name").into());
        }
        let mut builder = cluster.to_builder().creation_timestamp(Utc::now());
        if cluster.state().is_none() {
            builder = builder.state(ClusterState::Pending);
        }
        let cluster = self.store.add(builder.build())?;
        let id = cluster.id().unwrap_or_default().to_string();
        let children = ClusterChildren::new(cluster.href().unwrap_or_default());
        self.children
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), Arc::new(children));
        tracing::info!(cluster_id = %id, name = ?cluster.name(), "cluster added");
        Ok(AddServerResponse::new(cluster))
    }

    fn cluster(&self, id: &str) -> Option<Arc<dyn ClusterServer>> {
        let children = self
            .children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()?;
        let item = Collection(Arc::clone(&self.store)).locate(id)?;
        Some(Arc::new(ClusterItem {
            item,
            children,
            registry: Arc::clone(&self.children),
        }))
    }
}

struct ClusterItem {
    item: Arc<Item<Cluster>>,
    children: Arc<ClusterChildren>,
    registry: Children,
}

#[async_trait]
impl ClusterServer for ClusterItem {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<Cluster>> {
        Ok(GetServerResponse::new(self.item.get()?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<Cluster>,
    ) -> anyhow::Result<UpdateServerResponse<Cluster>> {
        Ok(UpdateServerResponse::new(self.item.update(request.into_body())?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.item.remove()?;
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.item.id);
        tracing::info!(cluster_id = %self.item.id, "cluster deleted");
        Ok(DeleteServerResponse::new())
    }

    fn status(&self) -> Option<Arc<dyn ClusterStatusServer>> {
        Some(Arc::new(ClusterStatusItem(Arc::clone(&self.item))))
    }

    fn groups(&self) -> Option<Arc<dyn GroupsServer>> {
        Some(Arc::clone(&self.children) as Arc<dyn GroupsServer>)
    }

    fn identity_providers(&self) -> Option<Arc<dyn IdentityProvidersServer>> {
        Some(Collection::new(&self.children.identity_providers))
    }

    fn machine_pools(&self) -> Option<Arc<dyn MachinePoolsServer>> {
        Some(Collection::new(&self.children.machine_pools))
    }

    fn upgrade_policies(&self) -> Option<Arc<dyn UpgradePoliciesServer>> {
        Some(Collection::new(&self.children.upgrade_policies))
    }

    fn addons(&self) -> Option<Arc<dyn AddOnInstallationsServer>> {
        Some(Collection::new(&self.children.addons))
    }
}

struct ClusterStatusItem(Arc<Item<Cluster>>);

#[async_trait]
impl ClusterStatusServer for ClusterStatusItem {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<ClusterStatus>> {
        let cluster = self.0.get()?;
        let mut status = ClusterStatus::builder()
            .id(self.0.id.as_str())
            .href(format!("{}/status", cluster.href().unwrap_or_default()))
            .dns_ready(cluster.dns_ready().unwrap_or(false));
        if let Some(state) = cluster.state() {
            status = status.state(state.clone());
        }
        Ok(GetServerResponse::new(status.build()))
    }
}

#[async_trait]
impl GroupsServer for ClusterChildren {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<Group>> {
        Ok(self.groups.page(&request))
    }

    fn group(&self, id: &str) -> Option<Arc<dyn GroupServer>> {
        let users = self.users.get(id)?;
        let group = Collection(Arc::clone(&self.groups)).locate(id)?;
        Some(Arc::new(GroupItem {
            group,
            users: Arc::clone(users),
        }))
    }
}

struct GroupItem {
    group: Arc<Item<Group>>,
    users: Arc<Store<User>>,
}

#[async_trait]
impl GroupServer for GroupItem {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<Group>> {
        let group = self.group.get()?;
        let group = group.to_builder().users(self.users.all()).build();
        Ok(GetServerResponse::new(group))
    }

    fn users(&self) -> Option<Arc<dyn UsersServer>> {
        Some(Collection::new(&self.users))
    }
}

#[async_trait]
impl UsersServer for Collection<User> {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<User>> {
        Ok(self.0.page(&request))
    }

    async fn add(&self, request: AddServerRequest<User>) -> anyhow::Result<AddServerResponse<User>> {
        let user = request.into_body();
        if user.id().is_none() {
            return Err(missing_attribute(User::KIND, "id").into());
        }
        Ok(AddServerResponse::new(self.0.add(user)?))
    }

    fn user(&self, id: &str) -> Option<Arc<dyn UserServer>> {
        self.locate(id).map(|item| item as Arc<dyn UserServer>)
    }
}

#[async_trait]
impl UserServer for Item<User> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<User>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.remove()?;
        Ok(DeleteServerResponse::new())
    }
}

#[async_trait]
impl IdentityProvidersServer for Collection<IdentityProvider> {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<IdentityProvider>> {
        Ok(self.0.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<IdentityProvider>,
    ) -> anyhow::Result<AddServerResponse<IdentityProvider>> {
        let provider = request.into_body();
        if provider.type_().is_none() {
            return Err(missing_attribute(IdentityProvider::KIND, "type").into());
        }
        Ok(AddServerResponse::new(self.0.add(provider)?))
    }

    fn identity_provider(&self, id: &str) -> Option<Arc<dyn IdentityProviderServer>> {
        self.locate(id).map(|item| item as Arc<dyn IdentityProviderServer>)
    }
}

#[async_trait]
impl IdentityProviderServer for Item<IdentityProvider> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<IdentityProvider>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.remove()?;
        Ok(DeleteServerResponse::new())
    }
}

#[async_trait]
impl MachinePoolsServer for Collection<MachinePool> {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<MachinePool>> {
        Ok(self.0.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<MachinePool>,
    ) -> anyhow::Result<AddServerResponse<MachinePool>> {
        let pool = request.into_body();
        if pool.instance_type().is_none() {
            return Err(missing_attribute(MachinePool::KIND, "instance_type").into());
        }
        Ok(AddServerResponse::new(self.0.add(pool)?))
    }

    fn machine_pool(&self, id: &str) -> Option<Arc<dyn MachinePoolServer>> {
        self.locate(id).map(|item| item as Arc<dyn MachinePoolServer>)
    }
}

#[async_trait]
impl MachinePoolServer for Item<MachinePool> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<MachinePool>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<MachinePool>,
    ) -> anyhow::Result<UpdateServerResponse<MachinePool>> {
        Ok(UpdateServerResponse::new(Item::update(self, request.into_body())?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.remove()?;
        Ok(DeleteServerResponse::new())
    }
}

#[async_trait]
impl UpgradePoliciesServer for Collection<UpgradePolicy> {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<UpgradePolicy>> {
        Ok(self.0.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<UpgradePolicy>,
    ) -> anyhow::Result<AddServerResponse<UpgradePolicy>> {
        Ok(AddServerResponse::new(self.0.add(request.into_body())?))
    }

    fn upgrade_policy(&self, id: &str) -> Option<Arc<dyn UpgradePolicyServer>> {
        self.locate(id).map(|item| item as Arc<dyn UpgradePolicyServer>)
    }
}

#[async_trait]
impl UpgradePolicyServer for Item<UpgradePolicy> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<UpgradePolicy>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<UpgradePolicy>,
    ) -> anyhow::Result<UpdateServerResponse<UpgradePolicy>> {
        Ok(UpdateServerResponse::new(Item::update(self, request.into_body())?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.remove()?;
        Ok(DeleteServerResponse::new())
    }
}

#[async_trait]
impl AddOnInstallationsServer for Collection<AddOnInstallation> {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<AddOnInstallation>> {
        Ok(self.0.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<AddOnInstallation>,
    ) -> anyhow::Result<AddServerResponse<AddOnInstallation>> {
        let installation = request.into_body();
        let Some(addon) = installation.addon().and_then(AddOn::id) else {
            return Err(missing_attribute(AddOnInstallation::KIND, "addon").into());
        };
        let mut builder = installation
            .to_builder()
            .id(addon)
            .creation_timestamp(Utc::now());
        if installation.state().is_none() {
            builder = builder.state("installing");
        }
        Ok(AddServerResponse::new(self.0.add(builder.build())?))
    }

    fn addon_installation(&self, id: &str) -> Option<Arc<dyn AddOnInstallationServer>> {
        self.locate(id).map(|item| item as Arc<dyn AddOnInstallationServer>)
    }
}

#[async_trait]
impl AddOnInstallationServer for Item<AddOnInstallation> {
    async fn get(
        &self,
        _: GetServerRequest,
    ) -> anyhow::Result<GetServerResponse<AddOnInstallation>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.remove()?;
        Ok(DeleteServerResponse::new())
    }
}
