//! Persistence slot for the bearer credential.
//!
//! The store is purely a slot: it never inspects the token and never decides
//! whether it is still valid. At most one credential is current at a time,
//! and clearing an already-empty slot is success, not a conflict — several
//! components may race to invalidate the same credential.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::sync::Mutex;

/// Read/write access to the single persisted credential slot.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str);
    fn read(&self) -> Option<String>;
    fn clear(&self);
}

/// Token slot backed by `localStorage`, surviving page reloads.
///
/// Off the browser (server rendering, native tests) every operation is a
/// no-op and `read` yields `None`.
pub struct BrowserTokenStore {
    key: String,
}

impl BrowserTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStore for BrowserTokenStore {
    fn save(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Ok(Some(storage)) = window.local_storage() {
                    let _ = storage.set_item(&self.key, token);
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.key, token);
        }
    }

    fn read(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window()?;
            let storage = window.local_storage().ok().flatten()?;
            storage.get_item(&self.key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &self.key;
            None
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Ok(Some(storage)) = window.local_storage() {
                    let _ = storage.remove_item(&self.key);
                }
            }
        }
    }
}

/// In-memory token slot, used for server rendering and in tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        *self.lock() = Some(token.to_owned());
    }

    fn read(&self) -> Option<String> {
        self.lock().clone()
    }

    fn clear(&self) {
        *self.lock() = None;
    }
}

impl MemoryTokenStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
