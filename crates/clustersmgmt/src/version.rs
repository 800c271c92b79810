//! OpenShift versions and upgrade policies.

use chrono::{DateTime, Utc};
use ocm_core::ocm_class;

use crate::cloud::Value;

ocm_class! {
    /// Version of OpenShift that can be installed.
    pub struct Version: "Version" {
        value available_upgrades: Vec<String> => "available_upgrades",
        text channel_group: String => "channel_group",
        /// True for the version used when the cluster doesn't request one.
        copy default_: bool => "default",
        copy enabled: bool => "enabled",
        copy moa_enabled: bool => "moa_enabled",
        text raw_id: String => "raw_id",
    }
}

ocm_class! {
    /// Schedule of upgrades of a cluster.
    pub struct UpgradePolicy: "UpgradePolicy" {
        text cluster_id: String => "cluster_id",
        copy next_run: DateTime<Utc> => "next_run",
        value node_drain_grace_period: Value => "node_drain_grace_period",
        /// Cron expression, only meaningful for automatic upgrades.
        text schedule: String => "schedule",
        text schedule_type: String => "schedule_type",
        text upgrade_type: String => "upgrade_type",
        text version: String => "version",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_core::marshal;

    #[test]
    fn default_flag_uses_reserved_json_name() {
        let version = Version::builder()
            .id("openshift-v4.6.8")
            .default_(true)
            .available_upgrades(vec!["4.6.9".to_string()])
            .build();
        assert_eq!(version.default_(), Some(true));
        assert_eq!(
            marshal(&version).unwrap(),
            r#"{"kind":"Version","id":"openshift-v4.6.8","available_upgrades":["4.6.9"],"default":true}"#
        );
    }
}
