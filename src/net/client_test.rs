use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::net::token::MemoryTokenStore;

fn api_with_store() -> (Api, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::default());
    let api = Api::new(&AppConfig::default(), store.clone());
    (api, store)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn url_joins_base_and_path() {
    let (api, _) = api_with_store();
    assert_eq!(api.url("/admin/me"), "http://localhost:8000/admin/me");
}

#[test]
fn trailing_slash_in_base_url_is_trimmed() {
    let config = AppConfig {
        api_url: "https://api.example.test/".to_owned(),
        ..AppConfig::default()
    };
    let api = Api::new(&config, Arc::new(MemoryTokenStore::default()));
    assert_eq!(api.url("/admin/users"), "https://api.example.test/admin/users");
}

#[test]
fn tokens_accessor_shares_the_store() {
    let (api, store) = api_with_store();
    api.tokens().save("tok-1");
    assert_eq!(store.read().as_deref(), Some("tok-1"));
}

// =============================================================
// 401 policy
// =============================================================

#[test]
fn handle_unauthorized_clears_the_token() {
    let (api, store) = api_with_store();
    store.save("tok-1");
    api.handle_unauthorized();
    assert!(store.read().is_none());
}

#[test]
fn handle_unauthorized_notifies_the_hook() {
    let (api, _) = api_with_store();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    api.set_unauthorized_hook(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    api.handle_unauthorized();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn handle_unauthorized_without_hook_does_not_panic() {
    let (api, store) = api_with_store();
    store.save("tok-1");
    api.handle_unauthorized();
    assert!(store.read().is_none());
}

#[test]
fn handle_unauthorized_is_idempotent() {
    // Several in-flight requests may each observe a 401 nearly
    // simultaneously; repeated invocation must stay a no-op for the store
    // and keep notifying the hook without error.
    let (api, store) = api_with_store();
    store.save("tok-1");
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    api.set_unauthorized_hook(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    api.handle_unauthorized();
    api.handle_unauthorized();
    api.handle_unauthorized();

    assert!(store.read().is_none());
    assert_eq!(fired.load(Ordering::SeqCst), 3);
}

#[test]
fn clones_share_the_hook_registration() {
    let (api, _) = api_with_store();
    let clone = api.clone();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    api.set_unauthorized_hook(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    clone.handle_unauthorized();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

// =============================================================
// Error taxonomy
// =============================================================

#[test]
fn api_error_displays_server_message_verbatim() {
    let err = ApiError::Api("user not found".to_owned());
    assert_eq!(err.to_string(), "user not found");
}

#[test]
fn unauthorized_is_distinct_from_application_failure() {
    assert_ne!(ApiError::Unauthorized, ApiError::Api("denied".to_owned()));
}
