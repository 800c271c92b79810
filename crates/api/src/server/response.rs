//! Typed responses returned by server implementations.
//!
//! Responses start without a status; the dispatch layer then uses the default
//! status of the method: 200 for `list`, `get`, `update` and `post`, 201 for
//! `add` and 204 for `delete`.

use axum::http::StatusCode;
use axum::response::Response;
use ocm_core::{PageData, Wire, marshal};

use crate::app::errors::json_body;

/// One page of a collection.
#[derive(Debug, Clone)]
pub struct ListServerResponse<T> {
    items: Vec<T>,
    page: Option<i32>,
    size: Option<i32>,
    total: Option<i32>,
    status: Option<StatusCode>,
}

impl<T> ListServerResponse<T> {
    pub fn new(items: impl Into<Vec<T>>) -> Self {
        Self {
            items: items.into(),
            page: None,
            size: None,
            total: None,
            status: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(mut self, page: i32) -> Self {
        self.page = Some(page);
        self
    }

    /// Number of items in the page.
    pub fn size(mut self, size: i32) -> Self {
        self.size = Some(size);
        self
    }

    /// Number of items in the whole collection.
    pub fn total(mut self, total: i32) -> Self {
        self.total = Some(total);
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }
}

impl<T: Wire> ListServerResponse<T> {
    pub(crate) fn write(&self, kind: &str) -> ocm_core::Result<Response> {
        let data = PageData {
            kind: Some(kind.to_string()),
            page: self.page,
            size: self.size,
            total: self.total,
            items: Some(self.items.iter().map(Wire::wrap).collect()),
        };
        let body = serde_json::to_string(&data)?;
        Ok(json_body(self.status.unwrap_or(StatusCode::OK), body))
    }
}

macro_rules! body_response {
    ($(#[$meta:meta])* $name:ident, $default:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<T> {
            body: T,
            status: Option<StatusCode>,
        }

        impl<T> $name<T> {
            pub fn new(body: T) -> Self {
                Self { body, status: None }
            }

            pub fn body(&self) -> &T {
                &self.body
            }

            pub fn status(mut self, status: StatusCode) -> Self {
                self.status = Some(status);
                self
            }
        }

        impl<T: Wire> $name<T> {
            pub(crate) fn write(&self) -> ocm_core::Result<Response> {
                Ok(json_body(self.status.unwrap_or($default), marshal(&self.body)?))
            }
        }
    };
}

body_response!(GetServerResponse, StatusCode::OK);
body_response!(
    /// Object as stored after adding it, typically with `id` and `href` set.
    AddServerResponse,
    StatusCode::CREATED
);
body_response!(
    /// Object after the update.
    UpdateServerResponse,
    StatusCode::OK
);
body_response!(PostServerResponse, StatusCode::OK);

/// Response of a `delete` request; it has no body.
#[derive(Debug, Clone, Default)]
pub struct DeleteServerResponse {
    status: Option<StatusCode>,
}

impl DeleteServerResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) fn write(&self) -> ocm_core::Result<Response> {
        Ok(json_body(self.status.unwrap_or(StatusCode::NO_CONTENT), String::new()))
    }
}
