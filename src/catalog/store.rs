//! Shared, swappable catalog handle.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::Catalog;

/// Thread-safe holder of the current catalog.
///
/// Readers take an `Arc` snapshot and keep using it even if a reload installs
/// a new catalog meanwhile. A reload builds the replacement completely before
/// swapping it in.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Current catalog.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&*self.current.read().await)
    }

    /// Replace the catalog and return the previous one.
    pub async fn install(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let songs = next.len();
        let previous = {
            let mut guard = self.current.write().await;
            std::mem::replace(&mut *guard, next)
        };
        info!(songs, previous = previous.len(), "Installed new catalog");
        previous
    }
}
