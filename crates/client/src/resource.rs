use ocm_core::Wire;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Method;

use crate::connection::Connection;
use crate::error::Result;
use crate::request::{AddRequest, DeleteRequest, GetRequest, ListRequest, PostRequest, UpdateRequest};
use crate::send::{Exchange, Reply};

/// Characters escaped in identifiers placed in a path.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A resource of the API: the connection plus the path of the resource.
#[derive(Debug, Clone)]
pub(crate) struct Resource {
    conn: Connection,
    path: String,
    metric: String,
}

impl Resource {
    pub(crate) fn new(conn: Connection, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            conn,
            metric: path.clone(),
            path,
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    /// Resource found under this one at the fixed name `segment`.
    pub(crate) fn child(&self, segment: &str) -> Self {
        self.nested(segment, segment)
    }

    /// Object of this collection with identifier `id`, escaped so that it
    /// stays one segment of the path.
    pub(crate) fn item(&self, id: &str) -> Self {
        let segment = utf8_percent_encode(id, SEGMENT).to_string();
        self.nested(&segment, "-")
    }

    fn nested(&self, segment: &str, metric: &str) -> Self {
        Self {
            conn: self.conn.clone(),
            path: format!("{}/{}", self.path, segment),
            metric: format!("{}/{}", self.metric, metric),
        }
    }

    pub(crate) fn exchange(&self, method: Method) -> Exchange {
        Exchange::new(method, self.path.as_str()).metric(self.metric.as_str())
    }

    pub(crate) async fn send(&self, exchange: Exchange) -> Result<Reply> {
        self.conn.send(exchange).await
    }

    pub(crate) fn list<T: Wire>(&self) -> ListRequest<T> {
        ListRequest::new(self.clone())
    }

    pub(crate) fn get<T: Wire>(&self) -> GetRequest<T> {
        GetRequest::new(self.clone())
    }

    pub(crate) fn add<T: Wire>(&self) -> AddRequest<T> {
        AddRequest::new(self.clone())
    }

    pub(crate) fn update<T: Wire>(&self) -> UpdateRequest<T> {
        UpdateRequest::new(self.clone())
    }

    pub(crate) fn delete(&self) -> DeleteRequest {
        DeleteRequest::new(self.clone())
    }

    pub(crate) fn post<B: Wire, R: Wire>(&self) -> PostRequest<B, R> {
        PostRequest::new(self.clone())
    }
}

/// Declares the client of one resource.
macro_rules! resource_client {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(crate::resource::Resource);

        impl $name {
            pub(crate) fn new(resource: crate::resource::Resource) -> Self {
                Self(resource)
            }

            /// Path of the resource, relative to the API URL.
            pub fn path(&self) -> &str {
                self.0.path()
            }
        }
    };
}

pub(crate) use resource_client;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_hidden_from_metric_paths() {
        let connection = Connection::builder()
            .url("http://127.0.0.1:1")
            .client("id", "secret")
            .build()
            .unwrap();
        let pool = Resource::new(connection, "/api/clusters_mgmt/v1")
            .child("clusters")
            .item("123")
            .child("machine_pools")
            .item("workers");
        assert_eq!(pool.path(), "/api/clusters_mgmt/v1/clusters/123/machine_pools/workers");
        assert_eq!(pool.metric, "/api/clusters_mgmt/v1/clusters/-/machine_pools/-");
    }

    #[test]
    fn identifiers_stay_in_one_segment() {
        let connection = Connection::builder()
            .url("http://127.0.0.1:1")
            .client("id", "secret")
            .build()
            .unwrap();
        let entry = Resource::new(connection, "/api/service_logs/v1")
            .child("cluster_logs")
            .item("a/b c?%");
        assert_eq!(entry.path(), "/api/service_logs/v1/cluster_logs/a%2Fb%20c%3F%25");
    }
}
