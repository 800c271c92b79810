//! Add-ons and their installation on clusters.

use chrono::{DateTime, Utc};
use ocm_core::ocm_class;

use crate::cluster::Cluster;
use crate::enums::AddOnInstallMode;

ocm_class! {
    /// Operator that can be installed on a cluster.
    pub struct AddOn: "AddOn" {
        text description: String => "description",
        text docs_link: String => "docs_link",
        copy enabled: bool => "enabled",
        text icon: String => "icon",
        value install_mode: AddOnInstallMode => "install_mode",
        text label: String => "label",
        text name: String => "name",
        text operator_name: String => "operator_name",
        /// Number of quota units consumed by an installation.
        copy resource_cost: f64 => "resource_cost",
        text resource_name: String => "resource_name",
        text target_namespace: String => "target_namespace",
    }
}

ocm_class! {
    /// Add-on installed on a cluster.
    pub struct AddOnInstallation: "AddOnInstallation" {
        value addon: AddOn => "addon",
        value cluster: Cluster => "cluster",
        copy creation_timestamp: DateTime<Utc> => "creation_timestamp",
        text state: String => "state",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_core::unmarshal;

    #[test]
    fn installation_references_addon_and_cluster() {
        let json = r#"{
            "kind": "AddOnInstallation",
            "id": "dbaas-operator",
            "addon": {"kind": "AddOnLink", "id": "dbaas-operator"},
            "cluster": {"kind": "ClusterLink", "id": "123", "href": "/api/clusters_mgmt/v1/clusters/123"},
            "state": "installing"
        }"#;
        let installation: AddOnInstallation = unmarshal(json).unwrap();
        assert!(installation.addon().unwrap().link());
        assert_eq!(installation.cluster().and_then(Cluster::id), Some("123"));
        assert_eq!(installation.state(), Some("installing"));
    }

    #[test]
    fn install_mode_accepts_unknown() {
        let addon: AddOn = unmarshal(r#"{"install_mode":"SingleNamespace"}"#).unwrap();
        assert_eq!(
            addon.install_mode(),
            Some(&AddOnInstallMode::Other("SingleNamespace".to_string()))
        );
    }
}
