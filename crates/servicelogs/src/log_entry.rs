//! Entries of the log that services keep about each cluster.

use chrono::{DateTime, Utc};
use ocm_core::{ocm_class, ocm_enum};

ocm_enum! {
    pub enum Severity {
        Debug => "Debug",
        Info => "Info",
        Warning => "Warning",
        Error => "Error",
        Fatal => "Fatal",
    }
}

ocm_class! {
    /// Something a service reported about a cluster.
    pub struct LogEntry: "LogEntry" {
        text cluster_uuid: String => "cluster_uuid",
        text description: String => "description",
        /// Hidden from the owners of the cluster.
        copy internal_only: bool => "internal_only",
        text service_name: String => "service_name",
        value severity: Severity => "severity",
        text summary: String => "summary",
        copy timestamp: DateTime<Utc> => "timestamp",
    }
}
