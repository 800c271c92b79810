//! Client of the OCM API.
//!
//! A [`Connection`] knows the API URL and how to get access tokens. Resource
//! clients obtained from it follow the path structure of the API and build
//! typed requests:
//!
//! ```no_run
//! # async fn run() -> ocm_client::Result<()> {
//! let connection = ocm_client::Connection::builder()
//!     .client("my-client", "my-secret")
//!     .build()?;
//! let pools = connection
//!     .clusters_mgmt()
//!     .clusters()
//!     .cluster("1234")
//!     .machine_pools()
//!     .list()
//!     .size(10)
//!     .send()
//!     .await?;
//! for pool in pools.items() {
//!     println!("{:?}", pool.id());
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts_mgmt;
pub mod authorizations;
pub mod clusters_mgmt;
mod connection;
mod dump;
mod error;
mod metrics;
mod request;
mod resource;
mod send;
pub mod service_logs;
mod token;

pub use connection::{
    CLIENT_ID_ENV, CLIENT_SECRET_ENV, Connection, ConnectionBuilder, DEFAULT_AGENT,
    DEFAULT_CLIENT_ID, DEFAULT_SCOPES, DEFAULT_TOKEN_URL, DEFAULT_URL, TOKEN_ENV, TOKEN_URL_ENV,
    URL_ENV,
};
pub use error::{Error, Result};
pub use request::{
    AddRequest, BodyResponse, DeleteRequest, DeleteResponse, GetRequest, ListRequest,
    ListResponse, PostRequest, UpdateRequest,
};
