//! Shared services for the page components.
//!
//! One `AppServices` bundle (storage, session, backend client, build config)
//! is created at the app root and handed to pages through context. The
//! session is mirrored into a signal so the nav and pages re-render when it
//! changes.

use std::future::Future;

use dioxus::prelude::*;
use dioxus::router::Navigator;
use tracing::debug;

use crate::auth::AuthFlow;
use crate::client::{ApiClient, RequestScope};
use crate::config::ClientConfig;
use crate::session::{Session, SessionStore};
use crate::storage::{default_store, SharedStore};
use crate::views::{check, GuardOutcome};

use super::Route;

#[derive(Clone)]
pub struct AppServices {
    pub storage: SharedStore,
    pub session: SessionStore,
    pub client: ApiClient,
    pub config: ClientConfig,
}

impl AppServices {
    pub fn for_current_page() -> Self {
        let storage = default_store();
        Self {
            session: SessionStore::new(storage.clone()),
            storage,
            client: ApiClient::for_current_page(),
            config: ClientConfig::from_build_env(),
        }
    }
}

/// Copyable handle to the app services plus the reactive session mirror.
#[derive(Clone, Copy)]
pub struct AppContext {
    services: CopyValue<AppServices>,
    /// Rendering reads this, never storage, so SSR and hydration agree
    pub session_state: Signal<Option<Session>>,
}

impl AppContext {
    pub fn session(&self) -> SessionStore {
        self.services.read().session.clone()
    }

    pub fn client(&self) -> ApiClient {
        self.services.read().client.clone()
    }

    pub fn config(&self) -> ClientConfig {
        self.services.read().config.clone()
    }

    pub fn auth_flow(&self) -> AuthFlow {
        let services = self.services.read();
        AuthFlow::new(
            services.client.clone(),
            services.session.clone(),
            services.storage.clone(),
            services.config.clone(),
        )
    }
}

/// Create the services at the app root and mirror the session into a signal.
pub fn use_app_provider() -> AppContext {
    let session_state = use_signal(|| None::<Session>);
    let app = use_context_provider(|| AppContext {
        services: CopyValue::new(AppServices::for_current_page()),
        session_state,
    });

    let listener = use_hook(move || {
        app.session().subscribe(move |session| {
            let mut state = session_state;
            state.set(session.cloned());
        })
    });
    use_drop(move || app.session().unsubscribe(listener));

    // Effects only run in the browser, after hydration.
    use_effect(move || {
        let mut state = session_state;
        state.set(app.session().current());
    });

    app
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// Bearer token for an authenticated page, or a redirect to the login page.
///
/// Call from effects and event handlers only.
pub fn require_token(app: AppContext, nav: Navigator) -> Option<String> {
    match check(&app.session()) {
        GuardOutcome::Proceed(token) => Some(token),
        GuardOutcome::RedirectToLogin => {
            debug!("No session, redirecting to login");
            nav.replace(Route::Login {});
            None
        }
    }
}

/// Request scope that aborts everything still in flight when the page unmounts.
pub fn use_request_scope() -> RequestScope {
    let scope = use_hook(RequestScope::new);
    use_drop({
        let scope = scope.clone();
        move || scope.abort_all()
    });
    scope
}

/// Guard an authenticated page, then run `load` once with its bearer token.
///
/// Runs after hydration; SSR renders the empty state and never redirects.
pub fn use_authenticated_load<F, Fut>(mut load: F)
where
    F: FnMut(AppContext, String) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let app = use_app();
    let nav = navigator();
    use_effect(move || {
        if let Some(token) = require_token(app, nav) {
            spawn(load(app, token));
        }
    });
}
