//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::session_gate::SessionGate;
use crate::pages::home::HomePage;
use crate::services::auth::AuthService;
use crate::state::auth::AuthPhase;

pub const APP_TITLE: &str = "OAuth Gate";

/// Context handle for the auth service. The service holds `Rc` collaborators,
/// so it lives in thread-local arena storage.
pub type AuthServiceContext = StoredValue<Rc<AuthService>, LocalStorage>;

/// Root application component.
///
/// Provides the auth service and phase contexts, then gates all routes
/// behind a resolved session.
#[component]
pub fn App(service: Rc<AuthService>) -> impl IntoView {
    provide_meta_context();

    let phase = RwSignal::new(AuthPhase::default());
    provide_context::<AuthServiceContext>(StoredValue::new_local(service));
    provide_context(phase);

    view! {
        <Stylesheet id="oauth-gate" href="/style.css"/>
        <Title text=APP_TITLE/>

        <Router>
            <SessionGate>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                </Routes>
            </SessionGate>
        </Router>
    }
}

/// Shown instead of the app when the provider settings are unusable.
#[component]
pub fn ConfigErrorPage(message: String) -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{APP_TITLE}</h1>
                <p class="login-message">"Sign-in is not configured: " {message}</p>
            </div>
        </div>
    }
}

/// Build the browser-backed auth service and mount the app on `<body>`.
#[cfg(feature = "csr")]
pub fn mount() {
    use crate::config::OAuthConfig;
    use crate::util::browser::WindowBrowser;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    match OAuthConfig::from_build_env(&WindowBrowser::origin()) {
        Ok(config) => {
            let service = Rc::new(AuthService::in_browser(config));
            leptos::mount::mount_to_body(move || view! { <App service=service/> });
        }
        Err(e) => {
            leptos::logging::error!("OAuth configuration invalid: {e}");
            let message = e.to_string();
            leptos::mount::mount_to_body(move || view! { <ConfigErrorPage message=message/> });
        }
    }
}
