//! Accounts, organizations and labels.

use chrono::{DateTime, Utc};
use ocm_core::{List, ocm_class};

ocm_class! {
    /// User account of the service.
    pub struct Account: "Account" {
        text ban_code: String => "ban_code",
        text ban_description: String => "ban_description",
        copy banned: bool => "banned",
        copy created_at: DateTime<Utc> => "created_at",
        text email: String => "email",
        text first_name: String => "first_name",
        value labels: List<Label> => "labels",
        text last_name: String => "last_name",
        value organization: Organization => "organization",
        copy service_account: bool => "service_account",
        copy updated_at: DateTime<Utc> => "updated_at",
        text username: String => "username",
    }
}

ocm_class! {
    pub struct Organization: "Organization" {
        copy created_at: DateTime<Utc> => "created_at",
        text ebs_account_id: String => "ebs_account_id",
        text external_id: String => "external_id",
        value labels: List<Label> => "labels",
        text name: String => "name",
        copy updated_at: DateTime<Utc> => "updated_at",
    }
}

ocm_class! {
    /// Key/value pair attached to an account, organization or subscription.
    pub struct Label: "Label" {
        copy created_at: DateTime<Utc> => "created_at",
        copy internal: bool => "internal",
        text key: String => "key",
        copy updated_at: DateTime<Utc> => "updated_at",
        text value: String => "value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_core::{marshal, unmarshal};

    #[test]
    fn account_with_organization_link() {
        let json = r#"{
            "kind": "Account",
            "id": "1a2b3c",
            "username": "alice",
            "email": "alice@example.com",
            "banned": false,
            "organization": {"kind": "OrganizationLink", "id": "org1", "href": "/api/accounts_mgmt/v1/organizations/org1"},
            "labels": {"kind": "LabelList", "items": [{"kind": "Label", "key": "team", "value": "sre"}]},
            "created_at": "2021-03-04T05:06:07Z"
        }"#;
        let account: Account = unmarshal(json).unwrap();
        assert_eq!(account.username(), Some("alice"));
        assert_eq!(account.banned(), Some(false));
        assert!(account.organization().unwrap().link());
        let labels = account.labels().unwrap();
        assert_eq!(labels.get(0).and_then(Label::key), Some("team"));

        let again: Account = unmarshal(marshal(&account).unwrap()).unwrap();
        assert_eq!(again, account);
    }
}
