//! Landing and about pages.

use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <section class="landing">
            <h1>"Helenite"</h1>
            <p class="landing__tagline">"Share what you are up to with the people you know."</p>
            <div class="landing__actions">
                <a class="button" href="/login">"Log in"</a>
                <a class="button button--secondary" href="/register">"Create an account"</a>
            </div>
            <a class="landing__about" href="/about-us">"About us"</a>
        </section>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="about">
            <h1>"About Helenite"</h1>
            <p>"A small social network: post, like, comment, and keep up with friends."</p>
            <a href="/">"Back"</a>
        </section>
    }
}
