//! Chrome around the authenticated pages: sidebar navigation, the signed-in
//! administrator, and the sign-out control.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::client::Api;
use crate::state::session::{self, SessionState};

/// Sidebar-plus-content layout for the admin area.
#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    let api = expect_context::<Api>();
    let session = expect_context::<RwSignal<SessionState>>();

    let on_logout = move |_| {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let tokens = api.tokens();
            session::logout(&api, tokens.as_ref(), &session).await;
        });
    };

    view! {
        <div class="admin-layout">
            <aside class="admin-layout__sidebar">
                <h1 class="admin-layout__brand">"Bot Admin"</h1>
                <nav class="admin-layout__nav">
                    <A href="/users">"Users"</A>
                    <A href="/groups">"Groups"</A>
                    <A href="/stats">"Statistics"</A>
                </nav>
                <div class="admin-layout__session">
                    {move || {
                        session
                            .get()
                            .user
                            .map(|user| {
                                view! {
                                    <span class="admin-layout__user">
                                        {user.username} " (" {user.role.label()} ")"
                                    </span>
                                }
                            })
                    }}
                    <button class="btn admin-layout__logout" on:click=on_logout>
                        "Sign out"
                    </button>
                </div>
            </aside>
            <main class="admin-layout__content">{children()}</main>
        </div>
    }
}
