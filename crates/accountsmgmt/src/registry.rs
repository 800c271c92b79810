//! Container registries and the credentials to pull from them.

use chrono::{DateTime, Utc};
use ocm_core::ocm_class;

use crate::account::Account;

ocm_class! {
    pub struct Registry: "Registry" {
        copy cloud_alias: bool => "cloud_alias",
        copy created_at: DateTime<Utc> => "created_at",
        text name: String => "name",
        text org_name: String => "org_name",
        text team_name: String => "team_name",
        text type_: String => "type",
        copy updated_at: DateTime<Utc> => "updated_at",
        text url: String => "url",
    }
}

ocm_class! {
    /// Pull secret of an account for a registry.
    pub struct RegistryCredential: "RegistryCredential" {
        value account: Account => "account",
        copy created_at: DateTime<Utc> => "created_at",
        text external_resource_id: String => "external_resource_id",
        value registry: Registry => "registry",
        text token: String => "token",
        copy updated_at: DateTime<Utc> => "updated_at",
        text username: String => "username",
    }
}
