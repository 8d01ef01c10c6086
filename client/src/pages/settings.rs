//! Settings page: visibility flags, password change, avatar.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use helenite::mutation::settings::SettingsChange;
use helenite::net::transport::FileUpload;
use helenite::net::types::SettingsView;
use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_navigate;

use crate::pages::login::field_message;
use crate::state::app::AppContext;
use crate::util::flow::InlineError;
use crate::util::format;

/// A flag is only sent when the user moved it off its loaded value.
pub fn touched(loaded: bool, chosen: bool) -> Option<bool> {
    (loaded != chosen).then_some(chosen)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub private_profile: bool,
    pub show_birthday: bool,
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub pfp: Option<FileUpload>,
}

impl SettingsDraft {
    pub fn from_view(view: &SettingsView) -> Self {
        Self { private_profile: view.private_profile, show_birthday: view.show_birthday, ..Self::default() }
    }

    pub fn change(&self, loaded: &SettingsView) -> SettingsChange {
        SettingsChange {
            private_profile: touched(loaded.private_profile, self.private_profile),
            show_birthday: touched(loaded.show_birthday, self.show_birthday),
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
            pfp: self.pfp.clone(),
        }
    }
}

#[component]
pub fn SettingsPage(settings: Option<SettingsView>) -> impl IntoView {
    let Some(loaded) = settings else {
        return view! {
            <section class="settings settings--denied">
                <p>"You do not have permission to view these settings."</p>
            </section>
        }
        .into_any();
    };

    let app = expect_context::<AppContext>();
    let navigate = use_navigate();
    let draft = RwSignal::new(SettingsDraft::from_view(&loaded));
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<InlineError>);
    let avatar = format::avatar(loaded.pfp.as_deref());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let change = draft.with(|d| d.change(&loaded));
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let mut session = app.session.get_untracked();
                let navigator = app.navigator();
                let result =
                    helenite::mutation::settings::change_settings(&mut session, navigator.api(), &change).await;
                error.set(crate::util::flow::finish(app, session, result, navigate));
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (change, app, &navigate);
            busy.set(false);
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
                draft.update(|d| d.pfp = upload);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    view! {
        <section class="settings">
            <h1>"Settings"</h1>
            <form class="settings__form" on:submit=on_submit>
                <img class="avatar avatar--large" src=avatar alt=""/>
                <label class="form-field">
                    <span>"New profile picture"</span>
                    <input type="file" accept=".jpg,.jpeg,.png" on:change=on_pfp/>
                    <span class="field-error">{move || field_message(error.get().as_ref(), "pfp")}</span>
                </label>
                <label class="form-check">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.private_profile)
                        on:change=move |ev| draft.update(|d| d.private_profile = event_target_checked(&ev))
                    />
                    "Private profile"
                </label>
                <label class="form-check">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.show_birthday)
                        on:change=move |ev| draft.update(|d| d.show_birthday = event_target_checked(&ev))
                    />
                    "Show my birthday"
                </label>
                <fieldset class="settings__password">
                    <legend>"Change password"</legend>
                    <input
                        type="password"
                        placeholder="Current password"
                        prop:value=move || draft.with(|d| d.old_password.clone())
                        on:input=move |ev| draft.update(|d| d.old_password = event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="New password"
                        prop:value=move || draft.with(|d| d.new_password.clone())
                        on:input=move |ev| draft.update(|d| d.new_password = event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Confirm new password"
                        prop:value=move || draft.with(|d| d.confirm_password.clone())
                        on:input=move |ev| draft.update(|d| d.confirm_password = event_target_value(&ev))
                    />
                    <span class="field-error">{move || field_message(error.get().as_ref(), "new_password")}</span>
                </fieldset>
                <p class="settings__note">"Saving signs you out so the changes take effect."</p>
                <button class="button" type="submit" disabled=move || busy.get()>"Save"</button>
            </form>
        </section>
    }
    .into_any()
}
