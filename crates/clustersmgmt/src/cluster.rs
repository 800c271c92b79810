//! Clusters and the attributes that describe them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ocm_core::{List, ocm_class, ocm_struct};

use crate::addon::AddOnInstallation;
use crate::cloud::{Aws, Ccs, CloudProvider, CloudRegion, Gcp, MachineType, Value};
use crate::enums::{ClusterHealthState, ClusterState, ListeningMethod};
use crate::flavour::Flavour;
use crate::identity::{Group, IdentityProvider};
use crate::version::Version;

ocm_class! {
    /// Definition of an OpenShift cluster.
    ///
    /// The `nodes`, `region` and `flavour` attributes are required when creating a
    /// cluster; the rest are optional or computed by the service.
    pub struct Cluster: "Cluster" {
        value api: ClusterApi => "api",
        value aws: Aws => "aws",
        copy byoc: bool => "byoc",
        value ccs: Ccs => "ccs",
        value dns: Dns => "dns",
        copy dns_ready: bool => "dns_ready",
        value addons: List<AddOnInstallation> => "addons",
        value cloud_provider: CloudProvider => "cloud_provider",
        copy cluster_admin_enabled: bool => "cluster_admin_enabled",
        value console: ClusterConsole => "console",
        copy creation_timestamp: DateTime<Utc> => "creation_timestamp",
        text display_name: String => "display_name",
        /// After this instant the cluster is deleted by the service.
        copy expiration_timestamp: DateTime<Utc> => "expiration_timestamp",
        text external_id: String => "external_id",
        value flavour: Flavour => "flavour",
        value gcp: Gcp => "gcp",
        value groups: List<Group> => "groups",
        value health_state: ClusterHealthState => "health_state",
        value identity_providers: List<IdentityProvider> => "identity_providers",
        value ingresses: List<Ingress> => "ingresses",
        copy load_balancer_quota: i32 => "load_balancer_quota",
        copy managed: bool => "managed",
        copy multi_az: bool => "multi_az",
        text name: String => "name",
        value network: Network => "network",
        value nodes: ClusterNodes => "nodes",
        text openshift_version: String => "openshift_version",
        value properties: BTreeMap<String, String> => "properties",
        value region: CloudRegion => "region",
        value state: ClusterState => "state",
        value status: ClusterStatus => "status",
        value storage_quota: Value => "storage_quota",
        value version: Version => "version",
    }
}

ocm_class! {
    /// Detailed status of a cluster.
    pub struct ClusterStatus: "ClusterStatus" {
        text description: String => "description",
        copy dns_ready: bool => "dns_ready",
        value state: ClusterState => "state",
    }
}

ocm_class! {
    /// Credentials used to access a cluster.
    pub struct ClusterCredentials: "ClusterCredentials" {
        value admin: AdminCredentials => "admin",
        text kubeconfig: String => "kubeconfig",
        value ssh: SshCredentials => "ssh",
    }
}

ocm_class! {
    /// Log of a cluster, for example the installation log.
    pub struct Log: "Log" {
        text content: String => "content",
    }
}

ocm_class! {
    /// Router of a cluster.
    pub struct Ingress: "Ingress" {
        copy default_: bool => "default",
        text dns_name: String => "dns_name",
        value listening: ListeningMethod => "listening",
        value route_selectors: BTreeMap<String, String> => "route_selectors",
    }
}

ocm_struct! {
    /// Counts and placement of the nodes of a cluster.
    pub struct ClusterNodes {
        value availability_zones: Vec<String> => "availability_zones",
        copy compute: i32 => "compute",
        value compute_labels: BTreeMap<String, String> => "compute_labels",
        value compute_machine_type: MachineType => "compute_machine_type",
        copy infra: i32 => "infra",
        copy master: i32 => "master",
        copy total: i32 => "total",
    }
}

ocm_struct! {
    pub struct ClusterApi {
        value listening: ListeningMethod => "listening",
        text url: String => "url",
    }
}

ocm_struct! {
    pub struct ClusterConsole {
        text url: String => "url",
    }
}

ocm_struct! {
    pub struct Dns {
        text base_domain: String => "base_domain",
    }
}

ocm_struct! {
    /// Network settings of a cluster.
    pub struct Network {
        copy host_prefix: i32 => "host_prefix",
        text machine_cidr: String => "machine_cidr",
        text pod_cidr: String => "pod_cidr",
        text service_cidr: String => "service_cidr",
        text type_: String => "type",
    }
}

ocm_struct! {
    pub struct AdminCredentials {
        text password: String => "password",
        text user: String => "user",
    }
}

ocm_struct! {
    pub struct SshCredentials {
        text private_key: String => "private_key",
        text public_key: String => "public_key",
    }
}
