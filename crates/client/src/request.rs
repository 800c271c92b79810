//! Typed requests built by the resource clients and their responses.

use std::marker::PhantomData;

use ocm_core::{PageData, Wire};
use reqwest::Method;

use crate::error::{Error, Result};
use crate::resource::Resource;
use crate::send::Reply;

/// Retrieves one page of a collection.
#[derive(Debug, Clone)]
pub struct ListRequest<T> {
    resource: Resource,
    page: Option<i32>,
    size: Option<i32>,
    search: Option<String>,
    order: Option<String>,
    marker: PhantomData<fn() -> T>,
}

impl<T: Wire> ListRequest<T> {
    pub(crate) fn new(resource: Resource) -> Self {
        Self {
            resource,
            page: None,
            size: None,
            search: None,
            order: None,
            marker: PhantomData,
        }
    }

    /// Index of the page, starting at 1.
    pub fn page(mut self, page: i32) -> Self {
        self.page = Some(page);
        self
    }

    /// Maximum number of items of the page.
    pub fn size(mut self, size: i32) -> Self {
        self.size = Some(size);
        self
    }

    /// SQL like search criteria, for example `name like 'my%'`.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// SQL like ordering, for example `name desc`.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size", size.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(order) = &self.order {
            query.push(("order", order.clone()));
        }
        query
    }

    pub async fn send(self) -> Result<ListResponse<T>> {
        let exchange = self.resource.exchange(Method::GET).query(self.query());
        let reply = self.resource.send(exchange).await?;
        let data: PageData<T::Data> = serde_json::from_slice(&reply.body)?;
        let items = data
            .items
            .unwrap_or_default()
            .into_iter()
            .map(T::unwrap)
            .collect::<ocm_core::Result<Vec<_>>>()?;
        Ok(ListResponse {
            status: reply.status.as_u16(),
            page: data.page.unwrap_or_default(),
            size: data.size.unwrap_or_default(),
            total: data.total.unwrap_or_default(),
            items,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ListResponse<T> {
    status: u16,
    page: i32,
    size: i32,
    total: i32,
    items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn page(&self) -> i32 {
        self.page
    }

    /// Number of items in this page.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Number of items in the whole collection.
    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Response of a request whose answer is one object.
#[derive(Debug, Clone)]
pub struct BodyResponse<T> {
    status: u16,
    body: T,
}

impl<T> BodyResponse<T> {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_body(self) -> T {
        self.body
    }
}

fn decode<T: Wire>(reply: Reply) -> Result<BodyResponse<T>> {
    Ok(BodyResponse {
        status: reply.status.as_u16(),
        body: ocm_core::unmarshal(&reply.body)?,
    })
}

fn mandatory_body(resource: &Resource) -> Error {
    Error::request(format!("body of request to '{}' is mandatory", resource.path()))
}

/// Retrieves one object.
#[derive(Debug, Clone)]
pub struct GetRequest<T> {
    resource: Resource,
    marker: PhantomData<fn() -> T>,
}

impl<T: Wire> GetRequest<T> {
    pub(crate) fn new(resource: Resource) -> Self {
        Self {
            resource,
            marker: PhantomData,
        }
    }

    pub async fn send(self) -> Result<BodyResponse<T>> {
        let reply = self.resource.send(self.resource.exchange(Method::GET)).await?;
        decode(reply)
    }
}

macro_rules! body_request {
    ($(#[$meta:meta])* $name:ident, $method:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<T> {
            resource: Resource,
            body: Option<T>,
        }

        impl<T: Wire> $name<T> {
            pub(crate) fn new(resource: Resource) -> Self {
                Self {
                    resource,
                    body: None,
                }
            }

            pub fn body(mut self, body: T) -> Self {
                self.body = Some(body);
                self
            }

            pub async fn send(self) -> Result<BodyResponse<T>> {
                let body = self
                    .body
                    .ok_or_else(|| mandatory_body(&self.resource))?;
                let exchange = self.resource.exchange($method).body(ocm_core::marshal(&body)?);
                decode(self.resource.send(exchange).await?)
            }
        }
    };
}

body_request!(
    /// Adds an object to a collection.
    AddRequest,
    Method::POST
);
body_request!(
    /// Changes the attributes of an object that are set in the body.
    UpdateRequest,
    Method::PATCH
);

/// Deletes one object.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    resource: Resource,
}

impl DeleteRequest {
    pub(crate) fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub async fn send(self) -> Result<DeleteResponse> {
        let reply = self.resource.send(self.resource.exchange(Method::DELETE)).await?;
        Ok(DeleteResponse {
            status: reply.status.as_u16(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteResponse {
    status: u16,
}

impl DeleteResponse {
    pub fn status(&self) -> u16 {
        self.status
    }
}

/// Sends a request document to an action resource.
#[derive(Debug, Clone)]
pub struct PostRequest<B, R> {
    resource: Resource,
    body: Option<B>,
    marker: PhantomData<fn() -> R>,
}

impl<B: Wire, R: Wire> PostRequest<B, R> {
    pub(crate) fn new(resource: Resource) -> Self {
        Self {
            resource,
            body: None,
            marker: PhantomData,
        }
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub async fn send(self) -> Result<BodyResponse<R>> {
        let body = self
            .body
            .ok_or_else(|| mandatory_body(&self.resource))?;
        let exchange = self.resource.exchange(Method::POST).body(ocm_core::marshal(&body)?);
        decode(self.resource.send(exchange).await?)
    }
}
