//! Clients of the service logs service (`/api/service_logs/v1`).

use ocm_servicelogs::LogEntry;

use crate::request::{AddRequest, DeleteRequest, GetRequest, ListRequest};
use crate::resource::resource_client;

resource_client!(
    /// Root of the service logs service.
    ServiceLogsClient
);

impl ServiceLogsClient {
    pub fn cluster_logs(&self) -> ClusterLogsClient {
        ClusterLogsClient::new(self.0.child("cluster_logs"))
    }
}

resource_client!(
    /// Log entries of every cluster; `search` narrows them down, for example
    /// to one `cluster_uuid`.
    ClusterLogsClient
);

impl ClusterLogsClient {
    pub fn list(&self) -> ListRequest<LogEntry> {
        self.0.list()
    }

    pub fn add(&self) -> AddRequest<LogEntry> {
        self.0.add()
    }

    pub fn log_entry(&self, id: &str) -> LogEntryClient {
        LogEntryClient::new(self.0.item(id))
    }
}

resource_client!(LogEntryClient);

impl LogEntryClient {
    pub fn get(&self) -> GetRequest<LogEntry> {
        self.0.get()
    }

    pub fn delete(&self) -> DeleteRequest {
        self.0.delete()
    }
}
