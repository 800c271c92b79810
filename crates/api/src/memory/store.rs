use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use ocm_core::{ApiError, Class};
use uuid::Uuid;

use crate::server::{ListServerRequest, ListServerResponse};

/// Objects of one collection, keyed by identifier.
///
/// Identifiers are UUIDv7 strings unless the caller brings its own; pages
/// follow the order of the identifiers.
#[derive(Debug)]
pub struct Store<T> {
    path: String,
    items: RwLock<BTreeMap<String, T>>,
}

impl<T: Class> Store<T> {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Path of the collection, used to build the `href` of its items.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn href(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `item`, replacing any object with the same identifier.
    pub fn put(&self, item: T) -> T {
        let item = self.identify(item);
        let id = item.id().map(str::to_string).unwrap_or_default();
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, item.clone());
        item
    }

    /// Stores a new object; an identifier that is already taken is a conflict.
    pub fn add(&self, item: T) -> Result<T, ApiError> {
        let item = self.identify(item);
        let id = item.id().map(str::to_string).unwrap_or_default();
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        if items.contains_key(&id) {
            return Err(ApiError::builder()
                .id("409")
                .href(self.href(&id))
                .reason(format!("Object '{id}' already exists in '{}'", self.path))
                .build());
        }
        items.insert(id.clone(), item.clone());
        tracing::debug!(path = %self.path, id = %id, "object added");
        Ok(item)
    }

    pub fn get(&self, id: &str) -> Result<T, ApiError> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| self.missing(id))
    }

    /// Applies the attributes set in `patch` to the stored object.
    pub fn update(&self, id: &str, patch: T) -> Result<T, ApiError> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let item = items.get_mut(id).ok_or_else(|| self.missing(id))?;
        item.merge(patch);
        Ok(item.clone())
    }

    pub fn remove(&self, id: &str) -> Result<T, ApiError> {
        let removed = self
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .ok_or_else(|| self.missing(id))?;
        tracing::debug!(path = %self.path, id = %id, "object removed");
        Ok(removed)
    }

    pub fn all(&self) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Returns the page selected by `request`.
    ///
    /// Search and order criteria are accepted but not interpreted.
    pub fn page(&self, request: &ListServerRequest) -> ListServerResponse<T> {
        if request.search().is_some() || request.order().is_some() {
            tracing::debug!(
                path = %self.path,
                search = ?request.search(),
                order = ?request.order(),
                "ignoring search and order criteria"
            );
        }
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        let size = usize::try_from(request.size()).unwrap_or(0);
        let skip = usize::try_from(request.page().max(1) - 1)
            .unwrap_or(0)
            .saturating_mul(size);
        let page: Vec<T> = items.values().skip(skip).take(size).cloned().collect();
        let count = page.len();
        ListServerResponse::new(page)
            .page(request.page())
            .size(count_of(count))
            .total(count_of(items.len()))
    }

    fn identify(&self, mut item: T) -> T {
        let id = item
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        item.set_href(Some(self.href(&id)));
        item.set_id(Some(id));
        item
    }

    fn missing(&self, id: &str) -> ApiError {
        ApiError::builder()
            .id("404")
            .href(self.href(id))
            .reason(format!("Object '{id}' doesn't exist in '{}'", self.path))
            .build()
    }
}

fn count_of(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocm_clustersmgmt::Flavour;

    fn store() -> Store<Flavour> {
        Store::new("/api/clusters_mgmt/v1/flavours")
    }

    #[test]
    fn add_assigns_id_and_href() {
        let store = store();
        let added = store.add(Flavour::builder().name("osd-4").build()).unwrap();
        let id = added.id().unwrap().to_string();
        assert_eq!(id.len(), 36);
        assert_eq!(added.href(), Some(format!("/api/clusters_mgmt/v1/flavours/{id}").as_str()));
        assert_eq!(store.get(&id).unwrap(), added);
    }

    #[test]
    fn add_keeps_given_id_and_rejects_duplicates() {
        let store = store();
        store.add(Flavour::builder().id("4").build()).unwrap();
        let err = store.add(Flavour::builder().id("4").build()).unwrap_err();
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn missing_objects_are_not_found() {
        let store = store();
        assert_eq!(store.get("nope").unwrap_err().status(), Some(404));
        assert_eq!(store.remove("nope").unwrap_err().status(), Some(404));
        assert_eq!(store.update("nope", Flavour::default()).unwrap_err().status(), Some(404));
    }

    #[test]
    fn update_merges_set_attributes() {
        let store = store();
        store.put(Flavour::builder().id("4").name("osd-4").build());
        let updated = store
            .update("4", Flavour::builder().id("other").name("osd-4-large").build())
            .unwrap();
        assert_eq!(updated.id(), Some("4"));
        assert_eq!(updated.name(), Some("osd-4-large"));
    }

    #[test]
    fn pages_follow_identifier_order() {
        let store = store();
        for n in 0..5 {
            let flavour = Flavour::builder().id(format!("f{n}")).name(format!("flavour {n}"));
            store.add(flavour.build()).unwrap();
        }

        let request = ListServerRequest::default().with_page(2).with_size(2);
        let response = store.page(&request);
        let ids: Vec<_> = response.items().iter().filter_map(Flavour::id).collect();
        assert_eq!(ids, vec!["f2", "f3"]);
        assert_eq!(response.items()[0].name(), Some("flavour 2"));

        let last = store.page(&ListServerRequest::default().with_page(3).with_size(2));
        assert_eq!(last.items().len(), 1);

        let past_end = store.page(&ListServerRequest::default().with_page(9).with_size(2));
        assert!(past_end.items().is_empty());
    }

    #[test]
    fn remove_deletes() {
        let store = store();
        store.put(Flavour::builder().id("4").build());
        assert!(store.contains("4"));
        store.remove("4").unwrap();
        assert!(!store.contains("4"));
        assert!(store.is_empty());
    }
}
