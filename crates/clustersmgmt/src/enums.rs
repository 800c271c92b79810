//! Enumerated attributes of the clusters management types.

use ocm_core::ocm_enum;

ocm_enum! {
    /// Overall state of a cluster.
    pub enum ClusterState {
        Error => "error",
        Hibernating => "hibernating",
        Installing => "installing",
        Pending => "pending",
        PoweringDown => "powering_down",
        Ready => "ready",
        Resuming => "resuming",
        Uninstalling => "uninstalling",
        Unknown => "unknown",
        Validating => "validating",
        Waiting => "waiting",
    }
}

ocm_enum! {
    pub enum ClusterHealthState {
        Healthy => "healthy",
        Unhealthy => "unhealthy",
        Unknown => "unknown",
    }
}

ocm_enum! {
    /// Whether an endpoint of the cluster is reachable from outside of it.
    pub enum ListeningMethod {
        External => "external",
        Internal => "internal",
    }
}

ocm_enum! {
    pub enum IdentityProviderType {
        Github => "GithubIdentityProvider",
        Gitlab => "GitlabIdentityProvider",
        Google => "GoogleIdentityProvider",
        Htpasswd => "HTPasswdIdentityProvider",
        Ldap => "LDAPIdentityProvider",
        OpenId => "OpenIDIdentityProvider",
    }
}

ocm_enum! {
    /// How identities of a provider are mapped to cluster users.
    pub enum IdentityProviderMappingMethod {
        Add => "add",
        Claim => "claim",
        Generate => "generate",
        Lookup => "lookup",
    }
}

ocm_enum! {
    pub enum MachineTypeCategory {
        AcceleratedComputing => "accelerated_computing",
        ComputeOptimized => "compute_optimized",
        GeneralPurpose => "general_purpose",
        MemoryOptimized => "memory_optimized",
    }
}

ocm_enum! {
    pub enum AddOnInstallMode {
        AllNamespaces => "AllNamespaces",
        OwnNamespace => "OwnNamespace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_map_to_variants() {
        assert_eq!(ClusterState::from("powering_down"), ClusterState::PoweringDown);
        assert_eq!(ClusterState::Ready.to_string(), "ready");
        assert_eq!(IdentityProviderType::Htpasswd.as_str(), "HTPasswdIdentityProvider");
    }

    #[test]
    fn unknown_values_are_kept() {
        let state: ClusterState = serde_json::from_str("\"frozen\"").unwrap();
        assert_eq!(state, ClusterState::Other("frozen".to_string()));
        assert_eq!(serde_json::to_string(&state).unwrap(), "\"frozen\"");
    }
}
