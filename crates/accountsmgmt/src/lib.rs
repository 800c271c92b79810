//! Types of the accounts management service (`/api/accounts_mgmt/v1`).

pub mod account;
pub mod enums;
pub mod quota;
pub mod registry;
pub mod role;
pub mod subscription;

pub use account::{Account, AccountBuilder, Label, LabelBuilder, Organization, OrganizationBuilder};
pub use enums::Action;
pub use quota::{
    ClusterAuthorizationRequest, ClusterAuthorizationRequestBuilder, ClusterAuthorizationResponse,
    ClusterAuthorizationResponseBuilder, QuotaSummary, QuotaSummaryBuilder, ReservedResource,
    ReservedResourceBuilder, ResourceQuota, ResourceQuotaBuilder,
};
pub use registry::{Registry, RegistryBuilder, RegistryCredential, RegistryCredentialBuilder};
pub use role::{Permission, PermissionBuilder, Role, RoleBinding, RoleBindingBuilder, RoleBuilder};
pub use subscription::{Plan, PlanBuilder, Subscription, SubscriptionBuilder};
