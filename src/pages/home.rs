//! Landing page for a signed-in user.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use time::format_description::well_known::Rfc3339;

use crate::app::AuthServiceContext;
use crate::state::auth::AuthPhase;
use crate::state::session::Session;

fn expiry_label(session: &Session) -> String {
    match session.expires_at.and_then(|at| at.format(&Rfc3339).ok()) {
        Some(at) => format!("Session expires {at}"),
        None => "Session does not expire".to_owned(),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let service = expect_context::<AuthServiceContext>();
    let phase = expect_context::<RwSignal<AuthPhase>>();

    let session = move || phase.with(|p| p.session().cloned());
    let on_sign_out = move |_| {
        phase.set(AuthPhase::Loading);
        service.with_value(|s| s.sign_out());
    };

    view! {
        <div class="home-page">
            {move || {
                session()
                    .map(|s| {
                        view! {
                            <h2>"Signed in as " {s.username.clone()}</h2>
                            {s.email.clone().map(|e| view! { <p class="home-page__email">{e}</p> })}
                            <p class="home-page__expiry">{expiry_label(&s)}</p>
                        }
                    })
            }}
            <button class="login-button" on:click=on_sign_out>
                "Sign Out"
            </button>
        </div>
    }
}
