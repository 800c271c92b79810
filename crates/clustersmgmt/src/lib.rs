//! Types of the clusters management service (`/api/clusters_mgmt/v1`).
//!
//! Every type has a builder, optional attributes and a JSON wire form; see
//! [`ocm_core::Wire`].

pub mod addon;
pub mod cloud;
pub mod cluster;
pub mod enums;
pub mod flavour;
pub mod identity;
pub mod machine_pool;
pub mod version;

pub use addon::{AddOn, AddOnBuilder, AddOnInstallation, AddOnInstallationBuilder};
pub use cloud::{
    Aws, AwsBuilder, AwsFlavour, AwsFlavourBuilder, AwsVolume, AwsVolumeBuilder, Ccs, CcsBuilder,
    CloudProvider, CloudProviderBuilder, CloudRegion, CloudRegionBuilder, Gcp, GcpBuilder,
    MachineType, MachineTypeBuilder, Value, ValueBuilder,
};
pub use cluster::{
    AdminCredentials, AdminCredentialsBuilder, Cluster, ClusterApi, ClusterApiBuilder,
    ClusterBuilder, ClusterConsole, ClusterConsoleBuilder, ClusterCredentials,
    ClusterCredentialsBuilder, ClusterNodes, ClusterNodesBuilder, ClusterStatus,
    ClusterStatusBuilder, Dns, DnsBuilder, Ingress, IngressBuilder, Log, LogBuilder, Network,
    NetworkBuilder, SshCredentials, SshCredentialsBuilder,
};
pub use enums::{
    AddOnInstallMode, ClusterHealthState, ClusterState, IdentityProviderMappingMethod,
    IdentityProviderType, ListeningMethod, MachineTypeCategory,
};
pub use flavour::{Flavour, FlavourBuilder, FlavourNodes, FlavourNodesBuilder};
pub use identity::{
    GithubIdentityProvider, GithubIdentityProviderBuilder, Group, GroupBuilder,
    HtpasswdIdentityProvider, HtpasswdIdentityProviderBuilder, IdentityProvider,
    IdentityProviderBuilder, LdapIdentityProvider, LdapIdentityProviderBuilder, User, UserBuilder,
};
pub use machine_pool::{MachinePool, MachinePoolBuilder};
pub use version::{UpgradePolicy, UpgradePolicyBuilder, Version, VersionBuilder};
