//! Local Storage
//!
//! `window.localStorage` behind the `PreferenceStore` trait. Storage can be unavailable
//! (private mode, sandboxed iframes); reads then return nothing and writes are dropped.

use crm_core::prefs::PreferenceStore;
use tracing::warn;
use web_sys::Storage;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            warn!("[Storage] localStorage unavailable, dropping {}", key);
            return;
        };
        if storage.set_item(key, value).is_err() {
            warn!("[Storage] Failed to write {}", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}
