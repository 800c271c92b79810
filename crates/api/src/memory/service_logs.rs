use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ocm_core::Class;
use ocm_servicelogs::{LogEntry, Severity};

use super::{Collection, Item, Store, missing_attribute};
use crate::server::service_logs::{ClusterLogsServer, LogEntryServer, ServiceLogsServer};
use crate::server::{
    AddServerRequest, AddServerResponse, DeleteServerRequest, DeleteServerResponse,
    GetServerRequest, GetServerResponse, ListServerRequest, ListServerResponse,
};

const ROOT: &str = "/api/service_logs/v1";

/// Service logs backed by memory.
pub struct MemoryServiceLogs {
    entries: Arc<Store<LogEntry>>,
}

impl MemoryServiceLogs {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Store::new(format!("{ROOT}/cluster_logs"))),
        }
    }
}

impl Default for MemoryServiceLogs {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceLogsServer for MemoryServiceLogs {
    fn cluster_logs(&self) -> Option<Arc<dyn ClusterLogsServer>> {
        Some(Collection::new(&self.entries))
    }
}

#[async_trait]
impl ClusterLogsServer for Collection<LogEntry> {
    async fn list(&self, request: ListServerRequest) -> anyhow::Result<ListServerResponse<LogEntry>> {
        Ok(self.0.page(&request))
    }

    /// Entries get the current time unless they bring their own, and `Info`
    /// severity unless set.
    async fn add(
        &self,
        request: AddServerRequest<LogEntry>,
    ) -> anyhow::Result<AddServerResponse<LogEntry>> {
        let entry = request.into_body();
        for (name, missing) in [
            ("cluster_uuid", entry.cluster_uuid().is_none()),
            ("summary", entry.summary().is_none()),
        ] {
            if missing {
                return Err(missing_attribute(LogEntry::KIND, name).into());
            }
        }
        let mut builder = entry.to_builder();
        if entry.timestamp().is_none() {
            builder = builder.timestamp(Utc::now());
        }
        if entry.severity().is_none() {
            builder = builder.severity(Severity::Info);
        }
        let entry = self.0.add(builder.build())?;
        tracing::info!(
            cluster_uuid = entry.cluster_uuid().unwrap_or_default(),
            severity = %entry.severity().map(Severity::as_str).unwrap_or_default(),
            "log entry added"
        );
        Ok(AddServerResponse::new(entry))
    }

    fn log_entry(&self, id: &str) -> Option<Arc<dyn LogEntryServer>> {
        self.locate(id).map(|item| item as Arc<dyn LogEntryServer>)
    }
}

#[async_trait]
impl LogEntryServer for Item<LogEntry> {
    async fn get(&self, _: GetServerRequest) -> anyhow::Result<GetServerResponse<LogEntry>> {
        Ok(GetServerResponse::new(Item::get(self)?))
    }

    async fn delete(&self, _: DeleteServerRequest) -> anyhow::Result<DeleteServerResponse> {
        Item::remove(self)?;
        Ok(DeleteServerResponse::new())
    }
}
