//! Shared page helpers.

pub mod files;
pub mod flow;
pub mod format;
