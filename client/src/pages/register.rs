//! Account registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use helenite::validation::RegisterForm;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::pages::login::field_message;
use crate::state::app::AppContext;
use crate::util::flow::InlineError;

/// Text inputs in form order: (field, label, input type).
pub const TEXT_FIELDS: [(&str, &str, &str); 9] = [
    ("username", "Username", "text"),
    ("email", "Email", "email"),
    ("custom_slug_profile", "Profile path (optional)", "text"),
    ("first_name", "First name", "text"),
    ("last_name", "Last name", "text"),
    ("birthday", "Birthday", "date"),
    ("birth_place", "Country of birth", "text"),
    ("password", "Password", "password"),
    ("confirmation_password", "Confirm password", "password"),
];

/// Write one text input into the form. Unknown fields are ignored.
pub fn set_text(form: &mut RegisterForm, field: &str, value: String) {
    match field {
        "username" => form.username = value.trim().to_owned(),
        "email" => form.email = value.trim().to_owned(),
        "custom_slug_profile" => form.custom_slug_profile = value.trim().to_owned(),
        "first_name" => form.first_name = value,
        "last_name" => form.last_name = value,
        "birthday" => form.birthday = value,
        "birth_place" => form.birth_place = value,
        "password" => form.password = value,
        "confirmation_password" => form.confirmation_password = value,
        _ => {}
    }
}

pub fn text_value(form: &RegisterForm, field: &str) -> String {
    match field {
        "username" => form.username.clone(),
        "email" => form.email.clone(),
        "custom_slug_profile" => form.custom_slug_profile.clone(),
        "first_name" => form.first_name.clone(),
        "last_name" => form.last_name.clone(),
        "birthday" => form.birthday.clone(),
        "birth_place" => form.birth_place.clone(),
        "password" => form.password.clone(),
        "confirmation_password" => form.confirmation_password.clone(),
        _ => String::new(),
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let navigate = use_navigate();
    let form = RwSignal::new(RegisterForm { show_birthday: true, ..RegisterForm::default() });
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<InlineError>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let submitted = form.get();
        if let Err(e) = submitted.validate() {
            error.set(Some(InlineError { field: e.field, message: e.message }));
            return;
        }
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let session = app.session.get_untracked();
                let navigator = app.navigator();
                let result = helenite::mutation::auth::register(&session, navigator.api(), &submitted).await;
                error.set(crate::util::flow::finish(app, session, result, navigate));
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (submitted, app, &navigate);
        }
    };

    let on_pfp = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            leptos::task::spawn_local(async move {
                let upload = crate::util::files::read_selected(&input).await;
                form.update(|f| f.pfp = upload);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card login-card--wide">
                <h1>"Create an account"</h1>
                <form class="login-form" on:submit=on_submit>
                    {TEXT_FIELDS
                        .into_iter()
                        .map(|(field, label, kind)| {
                            view! {
                                <label class="form-field">
                                    <span>{label}</span>
                                    <input
                                        class="login-input"
                                        type=kind
                                        prop:value=move || form.with(|f| text_value(f, field))
                                        on:input=move |ev| form.update(|f| set_text(f, field, event_target_value(&ev)))
                                    />
                                    <span class="field-error">
                                        {move || field_message(error.get().as_ref(), field)}
                                    </span>
                                </label>
                            }
                        })
                        .collect_view()}
                    <label class="form-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.show_birthday)
                            on:change=move |ev| form.update(|f| f.show_birthday = event_target_checked(&ev))
                        />
                        "Show my birthday"
                    </label>
                    <label class="form-check">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.private_profile)
                            on:change=move |ev| form.update(|f| f.private_profile = event_target_checked(&ev))
                        />
                        "Private profile"
                    </label>
                    <label class="form-field">
                        <span>"Profile picture"</span>
                        <input type="file" accept=".jpg,.jpeg,.png" on:change=on_pfp/>
                        <span class="field-error">{move || field_message(error.get().as_ref(), "pfp")}</span>
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <p class="login-card__footer">
                    "Already registered? "
                    <a href="/login">"Log in"</a>
                </p>
            </div>
        </div>
    }
}
