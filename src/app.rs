//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::layout::AdminLayout;
use crate::components::route_guard::RequireAuth;
use crate::components::toast::NoticeTray;
use crate::config::AppConfig;
use crate::net::client::Api;
use crate::net::token::TokenStore;
use crate::pages::{groups::GroupsPage, login::LoginPage, stats::StatsPage, users::UsersPage};
use crate::state::notices::NoticesState;
use crate::state::session::SessionState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the shared [`Api`] handle and the session/notices contexts, wires
/// the transport's unauthorized hook into the session, and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_env();
    #[cfg(feature = "hydrate")]
    let tokens: Arc<dyn TokenStore> = Arc::new(crate::net::token::BrowserTokenStore::new(
        config.token_storage_key.as_str(),
    ));
    #[cfg(not(feature = "hydrate"))]
    let tokens: Arc<dyn TokenStore> = Arc::new(crate::net::token::MemoryTokenStore::default());
    let api = Api::new(&config, tokens);

    let session = RwSignal::new(SessionState::default());
    let notices = RwSignal::new(NoticesState::default());

    // A rejected credential anywhere resets the session and forces the app
    // back to the login boundary, regardless of which view made the call.
    api.set_unauthorized_hook(move || {
        let _ = session.try_update(SessionState::revoke);
        crate::util::nav::redirect_to_login();
    });

    provide_context(api);
    provide_context(session);
    provide_context(notices);

    view! {
        <Stylesheet id="leptos" href="/pkg/admin-console.css"/>
        <Title text="Bot Admin Console"/>

        <Router>
            <NoticeTray/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <Redirect path="/users"/> }
                />
                <Route
                    path=StaticSegment("users")
                    view=|| {
                        view! {
                            <RequireAuth>
                                <AdminLayout>
                                    <UsersPage/>
                                </AdminLayout>
                            </RequireAuth>
                        }
                    }
                />
                <Route
                    path=StaticSegment("groups")
                    view=|| {
                        view! {
                            <RequireAuth>
                                <AdminLayout>
                                    <GroupsPage/>
                                </AdminLayout>
                            </RequireAuth>
                        }
                    }
                />
                <Route
                    path=StaticSegment("stats")
                    view=|| {
                        view! {
                            <RequireAuth>
                                <AdminLayout>
                                    <StatsPage/>
                                </AdminLayout>
                            </RequireAuth>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}
