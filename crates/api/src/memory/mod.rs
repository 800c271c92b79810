//! In-memory reference servers.
//!
//! State lives in [`Store`] maps guarded by `RwLock`; nothing is persisted. The
//! servers are good enough to run the API locally and to drive the client in
//! tests.

use std::sync::Arc;

use ocm_core::{ApiError, Class};

use crate::server::Servers;

mod accounts_mgmt;
mod clusters_mgmt;
mod service_logs;
mod store;

pub use accounts_mgmt::{CURRENT_ACCOUNT_ID, MemoryAccountsMgmt};
pub use clusters_mgmt::MemoryClustersMgmt;
pub use service_logs::MemoryServiceLogs;
pub use store::Store;

/// Servers of every API group with a small seeded catalog.
pub fn servers() -> Servers {
    Servers::new()
        .clusters_mgmt(Arc::new(MemoryClustersMgmt::seeded()))
        .accounts_mgmt(Arc::new(MemoryAccountsMgmt::seeded()))
        .service_logs(Arc::new(MemoryServiceLogs::new()))
}

/// Collection resource backed by a store.
struct Collection<T>(Arc<Store<T>>);

impl<T: Class> Collection<T> {
    fn new(store: &Arc<Store<T>>) -> Arc<Self> {
        Arc::new(Self(Arc::clone(store)))
    }

    fn locate(&self, id: &str) -> Option<Arc<Item<T>>> {
        self.0.contains(id).then(|| {
            Arc::new(Item {
                store: Arc::clone(&self.0),
                id: id.to_string(),
            })
        })
    }
}

/// Item resource: one object of a store.
struct Item<T> {
    store: Arc<Store<T>>,
    id: String,
}

impl<T: Class> Item<T> {
    fn get(&self) -> Result<T, ApiError> {
        self.store.get(&self.id)
    }

    fn update(&self, patch: T) -> Result<T, ApiError> {
        self.store.update(&self.id, patch)
    }

    fn remove(&self) -> Result<T, ApiError> {
        self.store.remove(&self.id)
    }
}

/// Error for a mandatory attribute missing from a request body.
fn missing_attribute(kind: &str, name: &str) -> ApiError {
    ApiError::builder()
        .id("400")
        .reason(format!("Attribute '{name}' is mandatory for objects of kind '{kind}'"))
        .build()
}
