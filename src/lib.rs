//! # admin-console
//!
//! Leptos + WASM admin console for the messaging-bot platform. Covers the
//! session lifecycle (sign-in, stored-credential validation, sign-out, and
//! the global credential-rejection policy) and the moderation surface: user
//! bans and points, group member mutes and kicks, and platform statistics.
//!
//! The crate builds two ways: `hydrate` for the browser bundle with real
//! HTTP via `gloo-net`, and `ssr` for server rendering where network calls
//! are stubbed out.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
