//! Short-lived values carried across an in-app navigation, the way a browser
//! session store would carry them.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Key under which a clicked product id is handed to the detail page.
pub const PRODUCT_ID_KEY: &str = "storefront.productId";

/// Session-scoped key/value store. Reads consume the value so a stale id
/// never outlives the navigation that wrote it.
pub trait HandoffStore: Send + Sync {
    fn put(&self, key: &str, value: String);

    fn take(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct MemoryHandoff {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryHandoff {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandoffStore for MemoryHandoff {
    fn put(&self, key: &str, value: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
    }

    fn take(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}
