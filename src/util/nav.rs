//! Hard navigation to the login boundary.
//!
//! Used by the transport's unauthorized hook, which runs outside any router
//! context. Requires a browser environment; off-browser it is a no-op.

/// Force the application back to `/login`. Redirecting while already on the
/// login boundary is a no-op, so concurrent 401s collapse harmlessly.
pub fn redirect_to_login() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(path) = location.pathname() {
                if path.starts_with("/login") {
                    return;
                }
            }
            let _ = location.set_href("/login");
        }
    }
}
