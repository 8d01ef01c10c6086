//! # helenite
//!
//! Client core for the Helenite social network front end.
//!
//! This crate owns everything the browser client and the CLI share: the
//! persisted credential record, the session store and user profile cache,
//! the route table and its guard, the typed REST client, the per-route data
//! loaders, and the mutation flows that write to the server and then
//! resynchronize local state.
//!
//! ARCHITECTURE
//! ============
//! Persisted credentials -> session/profile -> route guard -> loaders ->
//! mutation flows. Presentation crates (`client/`, `cli/`) inject a
//! credential backend and an HTTP transport and consume the rest.

pub mod cancel;
pub mod clock;
pub mod config;
pub mod context;
pub mod guard;
pub mod loader;
pub mod mutation;
pub mod navigation;
pub mod net;
pub mod profile;
pub mod routes;
pub mod session;
pub mod storage;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::ClientConfig;
pub use context::SessionContext;
pub use net::api::ApiClient;
pub use routes::Route;
