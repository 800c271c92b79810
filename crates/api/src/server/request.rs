//! Typed requests passed to server implementations.

use ocm_core::query::{parse_integer, parse_string};
use ocm_core::{Wire, unmarshal};

use super::Call;

/// Parameters of a `list` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListServerRequest {
    page: i32,
    size: i32,
    search: Option<String>,
    order: Option<String>,
}

impl ListServerRequest {
    pub const DEFAULT_PAGE: i32 = 1;
    pub const DEFAULT_SIZE: i32 = 100;

    pub(crate) fn read(call: &Call) -> ocm_core::Result<Self> {
        let query = call.query();
        Ok(Self {
            page: parse_integer(query, "page")?.unwrap_or(Self::DEFAULT_PAGE),
            size: parse_integer(query, "size")?.unwrap_or(Self::DEFAULT_SIZE),
            search: parse_string(query, "search")?,
            order: parse_string(query, "order")?,
        })
    }

    /// Index of the requested page, starting with 1.
    pub fn page(&self) -> i32 {
        self.page
    }

    /// Maximum number of items of the page.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Search criteria, with the syntax of an SQL `where` clause.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Order criteria, with the syntax of an SQL `order by` clause.
    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn with_page(mut self, page: i32) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

impl Default for ListServerRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            size: Self::DEFAULT_SIZE,
            search: None,
            order: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetServerRequest {}

#[derive(Debug, Clone, Default)]
pub struct DeleteServerRequest {}

macro_rules! body_request {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<T> {
            body: T,
        }

        impl<T> $name<T> {
            pub fn new(body: T) -> Self {
                Self { body }
            }

            pub fn body(&self) -> &T {
                &self.body
            }

            pub fn into_body(self) -> T {
                self.body
            }
        }

        impl<T: Wire> $name<T> {
            pub(crate) fn read(call: &Call) -> ocm_core::Result<Self> {
                Ok(Self::new(unmarshal(call.body())?))
            }
        }
    };
}

body_request!(
    /// Object sent to a collection to add it.
    AddServerRequest
);
body_request!(
    /// Attributes sent to an item to update them; unset attributes are kept.
    UpdateServerRequest
);
body_request!(
    /// Body of a request to an action resource.
    PostServerRequest
);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::Method;

    fn list_call(query: &str) -> Call {
        Call::new(Method::GET, "/api/clusters_mgmt/v1/clusters", Some(query), Bytes::new())
    }

    #[test]
    fn list_defaults() {
        let request = ListServerRequest::read(&list_call("")).unwrap();
        assert_eq!(request.page(), 1);
        assert_eq!(request.size(), 100);
        assert_eq!(request.search(), None);
        assert_eq!(request, ListServerRequest::default());
    }

    #[test]
    fn list_parameters() {
        let request =
            ListServerRequest::read(&list_call("page=3&size=20&search=managed+%3D+true&order=name+desc"))
                .unwrap();
        assert_eq!(request.page(), 3);
        assert_eq!(request.size(), 20);
        assert_eq!(request.search(), Some("managed = true"));
        assert_eq!(request.order(), Some("name desc"));
    }

    #[test]
    fn malformed_size_is_an_error() {
        assert!(ListServerRequest::read(&list_call("size=ten")).is_err());
        assert!(ListServerRequest::read(&list_call("page=1&page=2")).is_err());
    }
}
