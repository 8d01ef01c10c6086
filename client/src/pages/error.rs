//! Error and not-found pages.

use helenite::loader::LoaderError;
use leptos::prelude::*;

#[component]
pub fn ErrorPage(error: LoaderError) -> impl IntoView {
    let status = error.status().map(|s| s.to_string()).unwrap_or_default();
    view! {
        <section class="error-page">
            <h1>"Something went wrong"</h1>
            <p class="error-page__status">{status}</p>
            <p class="error-page__message">{error.message().to_owned()}</p>
            <a href="/feed">"Back to your feed"</a>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="error-page">
            <h1>"Page not found"</h1>
            <a href="/">"Home"</a>
        </section>
    }
}
