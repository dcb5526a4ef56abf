//! Route guard for the authenticated area.

use leptos::children::ChildrenFn;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::client::Api;
use crate::state::session::{self, SessionPhase, SessionState};

/// Wraps the protected routes. On first mount with an unresolved session it
/// triggers a stored-credential validation; once the session settles
/// anonymous it redirects to `/login`. Guarded content is only rendered
/// while the session is authenticated, so a revoked credential hides it
/// immediately even before navigation completes.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let api = expect_context::<Api>();
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    // One validation attempt per mount; afterwards anonymous means redirect.
    let checked = StoredValue::new(false);

    Effect::new(move || {
        let state = session.get();
        match state.phase {
            SessionPhase::Anonymous => {
                if checked.get_value() {
                    navigate("/login", NavigateOptions::default());
                } else {
                    checked.set_value(true);
                    let api = api.clone();
                    leptos::task::spawn_local(async move {
                        let tokens = api.tokens();
                        session::check_auth(&api, tokens.as_ref(), &session).await;
                    });
                }
            }
            SessionPhase::Validating | SessionPhase::Authenticated => {}
        }
    });

    view! {
        <Show
            when=move || session.get().is_authenticated()
            fallback=|| view! { <p class="route-guard__pending">"Checking session..."</p> }
        >
            {children()}
        </Show>
    }
}
