//! Machine pools: groups of compute nodes with a common configuration.

use std::collections::BTreeMap;

use ocm_core::ocm_class;

use crate::cluster::Cluster;

ocm_class! {
    pub struct MachinePool: "MachinePool" {
        value availability_zones: Vec<String> => "availability_zones",
        value cluster: Cluster => "cluster",
        text instance_type: String => "instance_type",
        value labels: BTreeMap<String, String> => "labels",
        copy replicas: i32 => "replicas",
    }
}
