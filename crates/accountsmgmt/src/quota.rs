//! Quota of organizations and the resources reserved against it.

use chrono::{DateTime, Utc};
use ocm_core::{ocm_class, ocm_struct};

use crate::subscription::Subscription;

ocm_class! {
    /// Amount of a resource an organization is allowed to consume.
    pub struct ResourceQuota: "ResourceQuota" {
        copy allowed: i32 => "allowed",
        text availability_zone_type: String => "availability_zone_type",
        copy byoc: bool => "byoc",
        copy created_at: DateTime<Utc> => "created_at",
        text organization_id: String => "organization_id",
        text resource_name: String => "resource_name",
        text resource_type: String => "resource_type",
        text sku: String => "sku",
        copy sku_count: i32 => "sku_count",
        text type_: String => "type",
        copy updated_at: DateTime<Utc> => "updated_at",
    }
}

ocm_struct! {
    /// Allowed and reserved amounts of one kind of resource.
    pub struct QuotaSummary {
        copy allowed: i32 => "allowed",
        text availability_zone_type: String => "availability_zone_type",
        copy byoc: bool => "byoc",
        text organization_id: String => "organization_id",
        copy reserved: i32 => "reserved",
        text resource_name: String => "resource_name",
        text resource_type: String => "resource_type",
    }
}

ocm_struct! {
    pub struct ReservedResource {
        text availability_zone_type: String => "availability_zone_type",
        copy byoc: bool => "byoc",
        copy count: i32 => "count",
        copy created_at: DateTime<Utc> => "created_at",
        text resource_name: String => "resource_name",
        text resource_type: String => "resource_type",
        copy updated_at: DateTime<Utc> => "updated_at",
    }
}

ocm_struct! {
    /// Request to check and reserve the quota needed by a cluster.
    pub struct ClusterAuthorizationRequest {
        text account_username: String => "account_username",
        text availability_zone: String => "availability_zone",
        copy byoc: bool => "byoc",
        text cluster_id: String => "cluster_id",
        copy disconnected: bool => "disconnected",
        text display_name: String => "display_name",
        text external_cluster_id: String => "external_cluster_id",
        copy managed: bool => "managed",
        copy reserve: bool => "reserve",
        value resources: Vec<ReservedResource> => "resources",
    }
}

ocm_struct! {
    pub struct ClusterAuthorizationResponse {
        copy allowed: bool => "allowed",
        value excess_resources: Vec<ReservedResource> => "excess_resources",
        value subscription: Subscription => "subscription",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_core::{Wire, marshal, unmarshal};
    use proptest::prelude::*;

    #[test]
    fn authorization_request_with_resources() {
        let request = ClusterAuthorizationRequest::builder()
            .account_username("alice")
            .cluster_id("c1")
            .managed(true)
            .reserve(true)
            .resources(vec![
                ReservedResource::builder()
                    .resource_type("cluster.aws")
                    .resource_name("m5.xlarge")
                    .count(4)
                    .build(),
            ])
            .build();
        let json: serde_json::Value = serde_json::from_str(&marshal(&request).unwrap()).unwrap();
        assert_eq!(json["resources"][0]["count"], 4);
        assert!(json.get("kind").is_none());
        assert_eq!(unmarshal::<ClusterAuthorizationRequest>(marshal(&request).unwrap()).unwrap(), request);
    }

    fn summary() -> impl Strategy<Value = QuotaSummary> {
        (
            proptest::option::of(0i32..100),
            proptest::option::of(0i32..100),
            proptest::option::of(any::<bool>()),
            proptest::option::of("[a-z.]{1,12}"),
            proptest::option::of("(single|multi)"),
        )
            .prop_map(|(allowed, reserved, byoc, resource_name, zone)| {
                let mut builder = QuotaSummary::builder();
                if let Some(allowed) = allowed {
                    builder = builder.allowed(allowed);
                }
                if let Some(reserved) = reserved {
                    builder = builder.reserved(reserved);
                }
                if let Some(byoc) = byoc {
                    builder = builder.byoc(byoc);
                }
                if let Some(resource_name) = resource_name {
                    builder = builder.resource_name(resource_name);
                }
                if let Some(zone) = zone {
                    builder = builder.availability_zone_type(zone);
                }
                builder.build()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

        #[test]
        fn quota_summary_round_trip(summary in summary()) {
            prop_assert_eq!(QuotaSummary::unwrap(summary.wrap()).unwrap(), summary.clone());
            let json = marshal(&summary).unwrap();
            prop_assert_eq!(marshal(&unmarshal::<QuotaSummary>(&json).unwrap()).unwrap(), json);
        }
    }
}
