//! Ordered collections of class objects.

use serde::{Deserialize, Serialize};

use crate::class::Class;
use crate::error::{Error, Result};
use crate::wire::Wire;

/// Ordered collection of objects, optionally only a link to the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    href: Option<String>,
    link: bool,
    items: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            href: None,
            link: false,
            items: Vec::new(),
        }
    }
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_link(mut self, link: bool) -> Self {
        self.link = link;
        self
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// True when this is a reference to the collection rather than its content.
    pub fn link(&self) -> bool {
        self.link
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Class> List<T> {
    pub fn kind(&self) -> &'static str {
        if self.link {
            T::LIST_LINK_KIND
        } else {
            T::LIST_KIND
        }
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            href: None,
            link: false,
            items,
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Wire form of one page of a collection, as returned by `list` requests.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "D: Serialize", deserialize = "D: Deserialize<'de>"))]
pub struct PageData<D> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<D>>,
}

/// Wire form of a nested collection.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "D: Serialize", deserialize = "D: Deserialize<'de>"))]
pub struct ListData<D> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<D>>,
}

impl<T: Class> Wire for List<T> {
    type Data = ListData<T::Data>;

    fn wrap(&self) -> Self::Data {
        ListData {
            kind: Some(self.kind().to_string()),
            href: self.href.clone(),
            items: Some(self.items.iter().map(Wire::wrap).collect()),
        }
    }

    fn unwrap(data: Self::Data) -> Result<Self> {
        let link = match data.kind.as_deref() {
            None => false,
            Some(kind) if kind == T::LIST_KIND => false,
            Some(kind) if kind == T::LIST_LINK_KIND => true,
            Some(kind) => return Err(Error::unexpected_kind(T::LIST_KIND, kind)),
        };
        let items = match data.items {
            Some(items) => items.into_iter().map(T::unwrap).collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(Self {
            href: data.href,
            link,
            items,
        })
    }
}
