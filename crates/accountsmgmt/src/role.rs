//! Roles, permissions and the bindings that grant roles to accounts.

use chrono::{DateTime, Utc};
use ocm_core::{List, ocm_class};

use crate::account::{Account, Organization};
use crate::enums::Action;
use crate::subscription::Subscription;

ocm_class! {
    pub struct Role: "Role" {
        text name: String => "name",
        value permissions: List<Permission> => "permissions",
    }
}

ocm_class! {
    pub struct Permission: "Permission" {
        value action: Action => "action",
        text resource: String => "resource",
    }
}

ocm_class! {
    /// Grant of a role to an account, scoped to an organization or subscription.
    pub struct RoleBinding: "RoleBinding" {
        value account: Account => "account",
        text account_id: String => "account_id",
        copy config_managed: bool => "config_managed",
        copy created_at: DateTime<Utc> => "created_at",
        value organization: Organization => "organization",
        text organization_id: String => "organization_id",
        value role: Role => "role",
        text role_id: String => "role_id",
        value subscription: Subscription => "subscription",
        text subscription_id: String => "subscription_id",
        text type_: String => "type",
        copy updated_at: DateTime<Utc> => "updated_at",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_core::{marshal, unmarshal};

    #[test]
    fn role_with_permissions() {
        let role = Role::builder()
            .id("ClusterEditor")
            .name("Cluster Editor")
            .permissions(vec![
                Permission::builder().action(Action::Update).resource("Cluster").build(),
                Permission::builder().action(Action::Get).resource("Cluster").build(),
            ])
            .build();
        let json: serde_json::Value = serde_json::from_str(&marshal(&role).unwrap()).unwrap();
        assert_eq!(json["permissions"]["kind"], "PermissionList");
        assert_eq!(json["permissions"]["items"][0]["action"], "update");
        assert_eq!(unmarshal::<Role>(marshal(&role).unwrap()).unwrap(), role);
    }
}
