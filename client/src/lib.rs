//! # helenite-client
//!
//! Leptos + WASM front end for the Helenite social network.
//!
//! This crate is presentation only: pages, components, and the browser
//! bindings (`localStorage` credentials, `gloo-net` transport) that plug into
//! the `helenite` core. Session state, route guarding, loading, and every
//! write flow live in the core crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
