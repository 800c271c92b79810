//! Access reviews: questions of the form "can this account do this action on
//! this resource?".

use ocm_core::ocm_struct;

ocm_struct! {
    /// Asks whether an account can perform an action on a resource.
    pub struct AccessReviewRequest {
        text account_username: String => "account_username",
        /// One of `get`, `list`, `create`, `delete` or `update`.
        text action: String => "action",
        text cluster_id: String => "cluster_id",
        text cluster_uuid: String => "cluster_uuid",
        text organization_id: String => "organization_id",
        text resource_type: String => "resource_type",
        text subscription_id: String => "subscription_id",
    }
}

ocm_struct! {
    pub struct AccessReviewResponse {
        text account_username: String => "account_username",
        text action: String => "action",
        copy allowed: bool => "allowed",
        text cluster_id: String => "cluster_id",
        text cluster_uuid: String => "cluster_uuid",
        text organization_id: String => "organization_id",
        text resource_type: String => "resource_type",
        text subscription_id: String => "subscription_id",
    }
}

ocm_struct! {
    /// Same as [`AccessReviewRequest`] for the account that sends the request.
    pub struct SelfAccessReviewRequest {
        text action: String => "action",
        text cluster_id: String => "cluster_id",
        text cluster_uuid: String => "cluster_uuid",
        text organization_id: String => "organization_id",
        text resource_type: String => "resource_type",
        text subscription_id: String => "subscription_id",
    }
}

ocm_struct! {
    pub struct SelfAccessReviewResponse {
        text action: String => "action",
        copy allowed: bool => "allowed",
        text cluster_id: String => "cluster_id",
        text cluster_uuid: String => "cluster_uuid",
        text organization_id: String => "organization_id",
        text resource_type: String => "resource_type",
        text subscription_id: String => "subscription_id",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_core::{marshal, unmarshal};

    #[test]
    fn request_has_no_kind() {
        let request = AccessReviewRequest::builder()
            .account_username("alice")
            .action("get")
            .resource_type("Cluster")
            .build();
        assert_eq!(
            marshal(&request).unwrap(),
            r#"{"account_username":"alice","action":"get","resource_type":"Cluster"}"#
        );
    }

    #[test]
    fn response_decodes_allowed() {
        let response: SelfAccessReviewResponse =
            unmarshal(r#"{"action":"delete","resource_type":"Cluster","allowed":false}"#).unwrap();
        assert_eq!(response.allowed(), Some(false));
        assert_eq!(response.action(), Some("delete"));
        assert_eq!(response.cluster_id(), None);
    }
}
