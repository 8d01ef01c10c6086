//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and shared pieces (post cards, profile
//! lists, toasts) while reading and writing [`crate::state::app::AppContext`].

pub mod nav_bar;
pub mod post_card;
pub mod profile_list;
pub mod route_view;
pub mod toasts;
