//! Application-wide context: session snapshot, toasts, and the navigator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Flows borrow the session across awaits, so pages clone the snapshot out of
//! [`AppContext::session`], run the flow on the clone, and write it back when
//! the flow finishes. Storage is shared through `localStorage`, so a clone
//! never diverges from what the next refresh reads.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use helenite::mutation::Notice;
use helenite::navigation::Navigator;
use helenite::{ApiClient, ClientConfig, SessionContext};
use leptos::prelude::*;

use super::browser_store::BrowserStore;
use super::toast::ToastState;
use crate::net::transport::GlooTransport;

pub type AppSession = SessionContext<BrowserStore>;
pub type AppNavigator = Navigator<GlooTransport>;

/// Compile-time configuration for the WASM build.
pub fn client_config() -> ClientConfig {
    let baked = |key: &str| -> Option<&'static str> {
        match key {
            "HELENITE_API_URL" => option_env!("HELENITE_API_URL"),
            "HELENITE_EXPIRY_POLICY" => option_env!("HELENITE_EXPIRY_POLICY"),
            "HELENITE_STRICT_STATUS" => option_env!("HELENITE_STRICT_STATUS"),
            "HELENITE_SESSION_TTL_SECS" => option_env!("HELENITE_SESSION_TTL_SECS"),
            "HELENITE_REDIRECT_DELAY_MS" => option_env!("HELENITE_REDIRECT_DELAY_MS"),
            _ => None,
        }
    };
    ClientConfig::from_lookup(|key| baked(key).map(str::to_owned)).unwrap_or_else(|e| {
        leptos::logging::warn!("invalid build configuration, using defaults: {e}");
        ClientConfig::default()
    })
}

#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: RwSignal<AppSession>,
    pub toasts: RwSignal<ToastState>,
    /// Bumped to re-run the current route's loader.
    pub reload: RwSignal<u64>,
    navigator: StoredValue<Rc<AppNavigator>, LocalStorage>,
}

impl AppContext {
    pub fn new() -> Self {
        let config = client_config();
        let api = ApiClient::new(GlooTransport, &config.api_url);
        Self {
            session: RwSignal::new(SessionContext::new(BrowserStore, config)),
            toasts: RwSignal::new(ToastState::default()),
            reload: RwSignal::new(0),
            navigator: StoredValue::new_local(Rc::new(Navigator::new(api))),
        }
    }

    pub fn navigator(&self) -> Rc<AppNavigator> {
        self.navigator.get_value()
    }

    pub fn request_reload(&self) {
        self.reload.update(|n| *n += 1);
    }

    /// Show `notice` and dismiss it after a while.
    pub fn notify(&self, notice: Notice) {
        let Some(id) = self.toasts.try_update(|t| t.push(notice)) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let toasts = self.toasts;
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(super::toast::TOAST_LIFETIME_MS).await;
                toasts.update(|t| t.dismiss(id));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
