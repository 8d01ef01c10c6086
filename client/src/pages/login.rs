//! Username + password login page.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use helenite::validation::LoginForm;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::app::AppContext;
use crate::util::flow::InlineError;

/// Form values as submitted; the username is trimmed, the password is not.
pub fn login_form(username: &str, password: &str) -> LoginForm {
    LoginForm { username: username.trim().to_owned(), password: password.to_owned() }
}

/// Message to show under `field`, if the inline error belongs to it.
pub fn field_message(error: Option<&InlineError>, field: &str) -> Option<String> {
    error.filter(|e| e.field == field).map(|e| e.message.clone())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<InlineError>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = login_form(&username.get(), &password.get());
        if let Err(e) = form.validate() {
            error.set(Some(InlineError { field: e.field, message: e.message }));
            return;
        }
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let mut session = app.session.get_untracked();
                let navigator = app.navigator();
                let result = helenite::mutation::auth::login(&mut session, navigator.api(), &form).await;
                error.set(crate::util::flow::finish(app, session, result, navigate));
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (form, app, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Helenite"</h1>
                <p class="login-card__subtitle">"Log in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <p class="field-error">{move || field_message(error.get().as_ref(), "username")}</p>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <p class="field-error">{move || field_message(error.get().as_ref(), "password")}</p>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Log in"
                    </button>
                </form>
                <p class="login-card__footer">
                    "No account yet? "
                    <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
