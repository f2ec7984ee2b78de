//! Route guard that resolves the session before rendering content.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the router. On mount it either completes a provider callback or
//! restores the stored session, then renders the loading screen, the login
//! prompt or its children according to the resulting [`AuthPhase`].

#[cfg(test)]
#[path = "session_gate_test.rs"]
mod session_gate_test;

use leptos::prelude::*;
use url::Url;

use crate::app::AuthServiceContext;
use crate::pages::login::{LoadingScreen, LoginPrompt};
use crate::services::auth::AuthService;
use crate::state::auth::AuthPhase;
use crate::util::browser::is_redirect_callback;

/// True when the page at `href` was loaded as an OAuth callback.
#[must_use]
pub fn is_callback_href(href: &str) -> bool {
    Url::parse(href)
        .ok()
        .and_then(|url| url.query().map(is_redirect_callback))
        .unwrap_or(false)
}

/// Settle the auth phase for the current page load.
///
/// Callbacks go through the code exchange; any other load restores the
/// stored session.
pub async fn resolve_phase(service: &AuthService) -> AuthPhase {
    if is_callback_href(&service.browser().href()) {
        AuthPhase::settled(service.handle_redirect().await)
    } else {
        AuthPhase::settled(service.get_current_user())
    }
}

#[component]
pub fn SessionGate(children: ChildrenFn) -> impl IntoView {
    let service = expect_context::<AuthServiceContext>();
    let phase = expect_context::<RwSignal<AuthPhase>>();

    Effect::new(move || {
        let service = service.get_value();
        if is_callback_href(&service.browser().href()) {
            phase.set(AuthPhase::PendingRedirect);
        }
        leptos::task::spawn_local(async move {
            let next = resolve_phase(&service).await;
            phase.set(next);
        });
    });

    move || match phase.get() {
        p if p.is_busy() => view! { <LoadingScreen/> }.into_any(),
        AuthPhase::SignedIn(_) => children().into_any(),
        _ => view! { <LoginPrompt/> }.into_any(),
    }
}
