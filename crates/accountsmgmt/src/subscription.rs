//! Subscriptions and plans.

use chrono::{DateTime, Utc};
use ocm_core::ocm_class;

use crate::account::Account;
use crate::registry::RegistryCredential;

ocm_class! {
    /// Entitlement of an organization to run a cluster.
    pub struct Subscription: "Subscription" {
        text cluster_id: String => "cluster_id",
        copy created_at: DateTime<Utc> => "created_at",
        value creator: Account => "creator",
        text display_name: String => "display_name",
        text external_cluster_id: String => "external_cluster_id",
        copy last_telemetry_date: DateTime<Utc> => "last_telemetry_date",
        copy managed: bool => "managed",
        text organization_id: String => "organization_id",
        value plan: Plan => "plan",
        value registry_credential: RegistryCredential => "registry_credential",
        text status: String => "status",
        copy updated_at: DateTime<Utc> => "updated_at",
    }
}

ocm_class! {
    pub struct Plan: "Plan" {
        text name: String => "name",
        text type_: String => "type",
    }
}
