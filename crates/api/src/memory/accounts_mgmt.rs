use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use ocm_accountsmgmt::{Account, Organization, QuotaSummary, ResourceQuota, Subscription};

use super::{Collection, Item, Store, missing_attribute};
use crate::server::accounts_mgmt::{
    AccountServer, AccountsMgmtServer, AccountsServer, CurrentAccountServer, OrganizationServer,
    OrganizationsServer, QuotaSummaryServer, ResourceQuotaServer, ResourceQuotasServer,
    SubscriptionServer, SubscriptionsServer,
};
use crate::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse,
    UpdateServerRequest, UpdateServerResponse,
};

const ROOT: &str = "/api/accounts_mgmt/v1";

/// Identifier of the account returned as the current account of seeded services.
pub const CURRENT_ACCOUNT_ID: &str = "ocm-user";

/// Accounts management service backed by memory.
pub struct MemoryAccountsMgmt {
    accounts: Arc<Store<Account>>,
    current: Option<String>,
    organizations: Arc<MemoryOrganizations>,
    subscriptions: Arc<Store<Subscription>>,
}

impl MemoryAccountsMgmt {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Store::new(format!("{ROOT}/accounts"))),
            current: None,
            organizations: Arc::new(MemoryOrganizations::new()),
            subscriptions: Arc::new(Store::new(format!("{ROOT}/subscriptions"))),
        }
    }

    /// Service with one organization, its quota and one account, which is
    /// also the current account.
    pub fn seeded() -> Self {
        let mut service = Self::new();
        let now = Utc::now();

        let organization = service.organizations.put(
            Organization::builder()
                .id("ocm-org")
                .name("OCM Organization")
                .external_id("12345")
                .created_at(now)
                .build(),
        );
        let org_id = organization.id().unwrap_or_default().to_string();
        if let Some(quotas) = service.organizations.quotas_of(&org_id) {
            quotas.put(
                ResourceQuota::builder()
                    .id("cluster-aws-multi-az")
                    .organization_id(org_id.as_str())
                    .resource_name("m5.xlarge")
                    .resource_type("cluster")
                    .availability_zone_type("multi")
                    .byoc(false)
                    .allowed(5)
                    .sku("MW00530")
                    .created_at(now)
                    .build(),
            );
        }

        service.accounts.put(
            Account::builder()
                .id(CURRENT_ACCOUNT_ID)
                .username(CURRENT_ACCOUNT_ID)
                .email("ocm-user@example.com")
                .first_name("OCM")
                .last_name("User")
                .organization(
                    Organization::builder()
                        .id(org_id.as_str())
                        .href(organization.href().unwrap_or_default())
                        .link(true),
                )
                .created_at(now)
                .build(),
        );
        service.current = Some(CURRENT_ACCOUNT_ID.to_string());
        service
    }
}

impl Default for MemoryAccountsMgmt {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountsMgmtServer for MemoryAccountsMgmt {
    fn accounts(&self) -> Option<Arc<dyn AccountsServer>> {
        Some(Collection::new(&self.accounts))
    }

    fn current_account(&self) -> Option<Arc<dyn CurrentAccountServer>> {
        let id = self.current.as_deref()?;
        Collection(Arc::clone(&self.accounts))
            .locate(id)
            .map(|item| Arc::new(CurrentAccount(item)) as Arc<dyn CurrentAccountServer>)
    }

    fn organizations(&self) -> Option<Arc<dyn OrganizationsServer>> {
        Some(self.organizations.clone())
    }

    fn subscriptions(&self) -> Option<Arc<dyn SubscriptionsServer>> {
        Some(Collection::new(&self.subscriptions))
    }
}

#[async_trait]
impl AccountsServer for Collection<Account> {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<Account>> {
        Ok(self.0.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<Account>,
    ) -> anyhow::Result<AddServerResponse<Account>> {
        let account = request.into_body();
        if account.username().is_none() {
            return Err(missing_attribute(Account::KIND, "username").into());
        }
        let account = account.to_builder().created_at(Utc::now()).build();
        Ok(AddServerResponse::new(self.0.add(account)?))
    }

    fn account(&self, id: &str) -> Option<Arc<dyn AccountServer>> {
        self.locate(id).map(|item| item as Arc<dyn AccountServer>)
    }
}

#[async_trait]
impl AccountServer for Item<Account> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<Account>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<Account>,
    ) -> anyhow::Result<UpdateServerResponse<Account>> {
        let patch = request.into_body().to_builder().updated_at(Utc::now()).build();
        Ok(UpdateServerResponse::new(Item::update(self, patch)?))
    }
}

struct CurrentAccount(Arc<Item<Account>>);

#[async_trait]
impl CurrentAccountServer for CurrentAccount {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<Account>> {
        Ok(GetServerResponse::new(self.0.get()?))
    }
}

struct MemoryOrganizations {
    organizations: Arc<Store<Organization>>,
    quotas: RwLock<BTreeMap<String, Arc<Store<ResourceQuota>>>>,
}

impl MemoryOrganizations {
    fn new() -> Self {
        Self {
            organizations: Arc::new(Store::new(format!("{ROOT}/organizations"))),
            quotas: RwLock::new(BTreeMap::new()),
        }
    }

    fn put(&self, organization: Organization) -> Organization {
        let organization = self.organizations.put(organization);
        self.register(&organization);
        organization
    }

    fn register(&self, organization: &Organization) {
        let id = organization.id().unwrap_or_default().to_string();
        let path = format!("{}/resource_quota", self.organizations.href(&id));
        self.quotas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id)
            .or_insert_with(|| Arc::new(Store::new(path)));
    }

    fn quotas_of(&self, id: &str) -> Option<Arc<Store<ResourceQuota>>> {
        self.quotas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }
}

#[async_trait]
impl OrganizationsServer for MemoryOrganizations {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<Organization>> {
        Ok(self.organizations.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<Organization>,
    ) -> anyhow::Result<AddServerResponse<Organization>> {
        let organization = request.into_body();
        if organization.name().is_none() {
            return Err(missing_attribute(Organization::KIND, "name").into());
        }
        let organization = organization.to_builder().created_at(Utc::now()).build();
        let organization = self.organizations.add(organization)?;
        self.register(&organization);
        Ok(AddServerResponse::new(organization))
    }

    fn organization(&self, id: &str) -> Option<Arc<dyn OrganizationServer>> {
        let quotas = self.quotas_of(id)?;
        let item = Collection(Arc::clone(&self.organizations)).locate(id)?;
        Some(Arc::new(OrganizationItem { item, quotas }))
    }
}

struct OrganizationItem {
    item: Arc<Item<Organization>>,
    quotas: Arc<Store<ResourceQuota>>,
}

#[async_trait]
impl OrganizationServer for OrganizationItem {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<Organization>> {
        Ok(GetServerResponse::new(self.item.get()?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<Organization>,
    ) -> anyhow::Result<UpdateServerResponse<Organization>> {
        let patch = request.into_body().to_builder().updated_at(Utc::now()).build();
        Ok(UpdateServerResponse::new(self.item.update(patch)?))
    }

    fn quota_summary(&self) -> Option<Arc<dyn QuotaSummaryServer>> {
        Some(Arc::new(QuotaSummaries(Arc::clone(&self.quotas))))
    }

    fn resource_quota(&self) -> Option<Arc<dyn ResourceQuotasServer>> {
        Some(Collection::new(&self.quotas))
    }
}

/// Summary of the quota of an organization, computed from its resource quotas.
struct QuotaSummaries(Arc<Store<ResourceQuota>>);

impl QuotaSummaries {
    fn summarize(&self) -> Vec<QuotaSummary> {
        let mut summaries: BTreeMap<(String, String, String, bool), QuotaSummary> = BTreeMap::new();
        for quota in self.0.all() {
            let key = (
                quota.resource_type().unwrap_or_default().to_string(),
                quota.resource_name().unwrap_or_default().to_string(),
                quota.availability_zone_type().unwrap_or_default().to_string(),
                quota.byoc().unwrap_or(false),
            );
            let allowed = quota.allowed().unwrap_or(0);
            summaries
                .entry(key)
                .and_modify(|summary| {
                    let total = summary.allowed().unwrap_or(0).saturating_add(allowed);
                    *summary = summary.to_builder().allowed(total).build();
                })
                .or_insert_with(|| summary_of(&quota));
        }
        summaries.into_values().collect()
    }
}

fn summary_of(quota: &ResourceQuota) -> QuotaSummary {
    let mut summary = QuotaSummary::builder()
        .allowed(quota.allowed().unwrap_or(0))
        .reserved(0)
        .byoc(quota.byoc().unwrap_or(false));
    if let Some(value) = quota.organization_id() {
        summary = summary.organization_id(value);
    }
    if let Some(value) = quota.resource_name() {
        summary = summary.resource_name(value);
    }
    if let Some(value) = quota.resource_type() {
        summary = summary.resource_type(value);
    }
    if let Some(value) = quota.availability_zone_type() {
        summary = summary.availability_zone_type(value);
    }
    summary.build()
}

#[async_trait]
impl QuotaSummaryServer for QuotaSummaries {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<QuotaSummary>> {
        let items = self.summarize();
        let total = i32::try_from(items.len()).unwrap_or(i32::MAX);
        let size = usize::try_from(request.size()).unwrap_or(0);
        let skip = usize::try_from(request.page().max(1) - 1)
            .unwrap_or(0)
            .saturating_mul(size);
        let page: Vec<QuotaSummary> = items.into_iter().skip(skip).take(size).collect();
        let count = i32::try_from(page.len()).unwrap_or(i32::MAX);
        Ok(ListServerResponse::new(page)
            .page(request.page())
            .size(count)
            .total(total))
    }
}

#[async_trait]
impl ResourceQuotasServer for Collection<ResourceQuota> {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<ResourceQuota>> {
        Ok(self.0.page(&request))
    }

    async fn add(
        &self,
        request: AddServerRequest<ResourceQuota>,
    ) -> anyhow::Result<AddServerResponse<ResourceQuota>> {
        let quota = request.into_body();
        if quota.resource_name().is_none() {
            return Err(missing_attribute(ResourceQuota::KIND, "resource_name").into());
        }
        let quota = quota.to_builder().created_at(Utc::now()).build();
        Ok(AddServerResponse::new(self.0.add(quota)?))
    }

    fn resource_quota(&self, id: &str) -> Option<Arc<dyn ResourceQuotaServer>> {
        self.locate(id).map(|item| item as Arc<dyn ResourceQuotaServer>)
    }
}

#[async_trait]
impl ResourceQuotaServer for Item<ResourceQuota> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<ResourceQuota>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<ResourceQuota>,
    ) -> anyhow::Result<UpdateServerResponse<ResourceQuota>> {
        let patch = request.into_body().to_builder().updated_at(Utc::now()).build();
        Ok(UpdateServerResponse::new(Item::update(self, patch)?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.remove()?;
        Ok(DeleteServerResponse::new())
    }
}

#[async_trait]
impl SubscriptionsServer for Collection<Subscription> {
    async fn list(
        &self,
        request: ListServerRequest,
    ) -> anyhow::Result<ListServerResponse<Subscription>> {
        Ok(self.0.page(&request))
    }

    fn subscription(&self, id: &str) -> Option<Arc<dyn SubscriptionServer>> {
        self.locate(id).map(|item| item as Arc<dyn SubscriptionServer>)
    }
}

#[async_trait]
impl SubscriptionServer for Item<Subscription> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<Subscription>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn update(
        &self,
        request: UpdateServerRequest<Subscription>,
    ) -> anyhow::Result<UpdateServerResponse<Subscription>> {
        let patch = request.into_body().to_builder().updated_at(Utc::now()).build();
        Ok(UpdateServerResponse::new(Item::update(self, patch)?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        self.remove()?;
        Ok(DeleteServerResponse::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_summary_adds_up_matching_quotas() {
        let quotas = Arc::new(Store::new("/quotas"));
        for (id, allowed) in [("a", 2), ("b", 3)] {
            quotas.put(
                ResourceQuota::builder()
                    .id(id)
                    .resource_type("cluster")
                    .resource_name("m5.xlarge")
                    .allowed(allowed)
                    .build(),
            );
        }
        quotas.put(
            ResourceQuota::builder()
                .id("c")
                .resource_type("compute.node")
                .resource_name("m5.xlarge")
                .allowed(10)
                .build(),
        );

        let summaries = QuotaSummaries(quotas).summarize();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].resource_type(), Some("cluster"));
        assert_eq!(summaries[0].allowed(), Some(5));
        assert_eq!(summaries[0].reserved(), Some(0));
        assert_eq!(summaries[1].allowed(), Some(10));
    }

    #[test]
    fn seeded_service_has_a_current_account() {
        let service = MemoryAccountsMgmt::seeded();
        assert!(service.current_account().is_some());
        assert!(MemoryAccountsMgmt::new().current_account().is_none());
        let quotas = service.organizations.quotas_of("ocm-org").unwrap();
        assert_eq!(quotas.len(), 1);
    }
}
