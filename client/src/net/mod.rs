//! Browser bindings for the core HTTP seam.

pub mod transport;
