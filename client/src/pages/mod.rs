//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page renders one [`PageData`] variant and owns the flows started from
//! it. Loading and guarding already happened in the route view.

pub mod error;
pub mod feed;
pub mod friends;
pub mod home;
pub mod login;
pub mod post;
pub mod profile;
pub mod register;
pub mod search;
pub mod settings;

use helenite::navigation::PageData;
use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

pub fn page_view(data: PageData) -> AnyView {
    match data {
        PageData::Landing => view! { <home::LandingPage/> }.into_any(),
        PageData::AboutUs => view! { <home::AboutPage/> }.into_any(),
        PageData::Login => view! { <login::LoginPage/> }.into_any(),
        PageData::Register => view! { <register::RegisterPage/> }.into_any(),
        PageData::Feed(page) => view! { <feed::FeedView page title="Your feed"/> }.into_any(),
        PageData::Discover(page) => view! { <feed::FeedView page title="Discover"/> }.into_any(),
        PageData::Profile(profile) => view! { <profile::ProfileView profile/> }.into_any(),
        PageData::Settings(settings) => view! { <settings::SettingsPage settings/> }.into_any(),
        PageData::Friends(friends) => view! { <friends::FriendsView friends/> }.into_any(),
        PageData::Post(detail) => view! { <post::PostView detail/> }.into_any(),
        PageData::Search(results) => view! { <search::SearchView results/> }.into_any(),
    }
}
