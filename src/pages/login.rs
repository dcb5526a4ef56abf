//! Sign-in page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::client::Api;
use crate::state::session::{self, SessionState};

/// Credential form. Submitting runs the full sign-in sequence; once the
/// session settles authenticated the page navigates to the admin area.
#[component]
pub fn LoginPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form_error = RwSignal::new(Option::<String>::None);

    // Covers both an already-live session and a login that just settled.
    Effect::new(move || {
        if session.get().is_authenticated() {
            navigate("/users", NavigateOptions::default());
        }
    });

    // A failure from this visit should not greet the next one.
    on_cleanup(move || {
        let _ = session.try_update(SessionState::clear_error);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let user = username.get_untracked().trim().to_owned();
        let pass = password.get_untracked();
        if user.is_empty() || pass.is_empty() {
            form_error.set(Some("Username and password are required.".to_owned()));
            return;
        }
        form_error.set(None);
        if session.get_untracked().is_validating() {
            return;
        }
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let tokens = api.tokens();
            session::login(&api, tokens.as_ref(), &session, &user, &pass).await;
        });
    };

    view! {
        <div class="login-page">
            <form class="login-page__card" on:submit=on_submit>
                <h1>"Admin Console"</h1>
                <label class="login-page__label">
                    "Username"
                    <input
                        class="login-page__input"
                        type="text"
                        prop:value=move || username.get()
                        on:input=move |ev| {
                            username.set(event_target_value(&ev));
                            form_error.set(None);
                        }
                    />
                </label>
                <label class="login-page__label">
                    "Password"
                    <input
                        class="login-page__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            form_error.set(None);
                        }
                    />
                </label>
                {move || {
                    form_error
                        .get()
                        .or_else(|| session.get().error)
                        .map(|message| view! { <p class="login-page__error">{message}</p> })
                }}
                <button
                    class="btn btn--primary"
                    type="submit"
                    disabled=move || session.get().is_validating()
                >
                    {move || {
                        if session.get().is_validating() { "Signing in..." } else { "Sign in" }
                    }}
                </button>
            </form>
        </div>
    }
}
