//! Groups, users and identity providers of clusters.

use ocm_core::{List, ocm_class, ocm_struct};

use crate::enums::{IdentityProviderMappingMethod, IdentityProviderType};

ocm_class! {
    /// Group of users of a cluster.
    pub struct Group: "Group" {
        value users: List<User> => "users",
    }
}

ocm_class! {
    /// User of a cluster. The identifier is the user name.
    pub struct User: "User" {}
}

ocm_class! {
    /// Source of identities for the users of a cluster.
    pub struct IdentityProvider: "IdentityProvider" {
        copy challenge: bool => "challenge",
        value github: GithubIdentityProvider => "github",
        value htpasswd: HtpasswdIdentityProvider => "htpasswd",
        value ldap: LdapIdentityProvider => "ldap",
        copy login: bool => "login",
        value mapping_method: IdentityProviderMappingMethod => "mapping_method",
        text name: String => "name",
        value type_: IdentityProviderType => "type",
    }
}

ocm_struct! {
    pub struct GithubIdentityProvider {
        text ca: String => "ca",
        text client_id: String => "client_id",
        text client_secret: String => "client_secret",
        text hostname: String => "hostname",
        value organizations: Vec<String> => "organizations",
        value teams: Vec<String> => "teams",
    }
}

ocm_struct! {
    pub struct HtpasswdIdentityProvider {
        text password: String => "password",
        text username: String => "username",
    }
}

ocm_struct! {
    pub struct LdapIdentityProvider {
        text bind_dn: String => "bind_dn",
        text bind_password: String => "bind_password",
        text ca: String => "ca",
        copy insecure: bool => "insecure",
        text url: String => "url",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_core::{marshal, unmarshal};

    #[test]
    fn provider_type_and_nested_settings() {
        let idp = IdentityProvider::builder()
            .name("corp-ldap")
            .type_(IdentityProviderType::Ldap)
            .mapping_method(IdentityProviderMappingMethod::Claim)
            .ldap(LdapIdentityProvider::builder().url("ldap://ldap.example.com").insecure(false))
            .build();
        let json: serde_json::Value = serde_json::from_str(&marshal(&idp).unwrap()).unwrap();
        assert_eq!(json["type"], "LDAPIdentityProvider");
        assert_eq!(json["mapping_method"], "claim");
        assert_eq!(json["ldap"]["insecure"], false);

        let back: IdentityProvider = unmarshal(marshal(&idp).unwrap()).unwrap();
        assert_eq!(back, idp);
    }

    #[test]
    fn user_without_attributes() {
        let user = User::builder().id("alice").build();
        assert_eq!(marshal(&user).unwrap(), r#"{"kind":"User","id":"alice"}"#);
        assert!(!user.is_empty());
        assert!(User::default().is_empty());
    }
}
