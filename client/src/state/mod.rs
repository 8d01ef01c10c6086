//! Shared client state provided through Leptos context.
//!
//! DESIGN
//! ======
//! Session state itself lives in the core `SessionContext`; this module only
//! adds the browser storage backend, the toast queue, and the bundle of
//! signals pages pull from context.

pub mod app;
pub mod browser_store;
pub mod toast;
