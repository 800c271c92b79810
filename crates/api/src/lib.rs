//! Server side of the OCM API: HTTP application, dispatch to server
//! implementations and in-memory reference servers.

pub mod app;
pub mod memory;
pub mod server;
