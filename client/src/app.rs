//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_guard::AuthGuard;
use crate::pages::{
    callback::CallbackPage, dashboard::DashboardPage, landing::LandingPage, playlist::PlaylistPage,
};
use crate::state::{auth::AuthState, playlists::PlaylistsState};

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
/// Provides the auth store and playlist inventory, and mounts protected
/// routes behind `AuthGuard`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    provide_context(RwSignal::new(PlaylistsState::default()));

    // Runs after the landing-page redirect has been issued.
    #[cfg(feature = "hydrate")]
    crate::net::api::on_session_expired(move || {
        auth.try_update(AuthState::clear);
    });

    view! {
        <Title text="PlaySwap"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=CallbackPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <AuthGuard><DashboardPage/></AuthGuard> }
                />
                <Route
                    path=(StaticSegment("playlist"), ParamSegment("id"))
                    view=|| view! { <AuthGuard><PlaylistPage/></AuthGuard> }
                />
            </Routes>
        </Router>
    }
}
