//! Route guard wrapping every protected page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs the profile check on mount and renders children only once the store
//! has resolved authenticated. Signed-out users are redirected to `/` with a
//! reason code, once per guard instance.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AuthState, check_auth};
use crate::util::auth::{GuardDecision, guard_decision, install_unauth_redirect};

#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    // No tracked reads: runs once per mount, in the browser only.
    Effect::new(move || {
        leptos::task::spawn_local(check_auth(auth));
    });

    let decision = Memo::new(move |_| guard_decision(&auth.get()));

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=move || {
                view! {
                    <div class="session-loading" role="status">
                        <span class="session-loading__spinner" aria-hidden="true"></span>
                        <p class="session-loading__text">
                            {move || match decision.get() {
                                GuardDecision::Redirect(_) => "Redirecting...",
                                _ => "Loading your session...",
                            }}
                        </p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
