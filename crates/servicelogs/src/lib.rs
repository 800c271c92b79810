//! Types of the service logs service (`/api/service_logs/v1`).

pub mod log_entry;

pub use log_entry::{LogEntry, LogEntryBuilder, Severity};
