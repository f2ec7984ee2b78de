//! Loading and sign-in screens shown by the session gate.

use leptos::prelude::*;

use crate::app::{APP_TITLE, AuthServiceContext};
use crate::state::auth::AuthPhase;

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{APP_TITLE}</h1>
                <div class="login-spinner"></div>
                <p class="login-card__subtitle">"Loading..."</p>
            </div>
        </div>
    }
}

/// Sign-in prompt. The button starts the provider redirect.
#[component]
pub fn LoginPrompt() -> impl IntoView {
    let service = expect_context::<AuthServiceContext>();
    let phase = expect_context::<RwSignal<AuthPhase>>();

    let on_sign_in = move |_| {
        phase.set(AuthPhase::Loading);
        service.with_value(|s| s.sign_in_with_redirect());
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{APP_TITLE}</h1>
                <h2>"Welcome"</h2>
                <p class="login-card__subtitle">"Please sign in to continue."</p>
                <button class="login-button" on:click=on_sign_in>
                    "Sign In"
                </button>
            </div>
        </div>
    }
}
