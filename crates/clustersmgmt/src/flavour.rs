//! Flavours: predefined sets of properties applied to new clusters.

use ocm_core::{ocm_class, ocm_struct};

use crate::cloud::AwsFlavour;
use crate::cluster::Network;

ocm_class! {
    /// Set of properties used as the defaults of a cluster, for example the
    /// number of nodes or the instance types.
    pub struct Flavour: "Flavour" {
        value aws: AwsFlavour => "aws",
        text name: String => "name",
        value network: Network => "network",
        value nodes: FlavourNodes => "nodes",
    }
}

ocm_struct! {
    pub struct FlavourNodes {
        copy master: i32 => "master",
    }
}
