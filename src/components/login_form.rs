//! Login Form Component
//!
//! One form for all three roles; the tab picks the endpoint and whether the
//! identifier is a username or an email.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ErrorBanner;
use crate::context::{home_for, use_app_context, Screen};
use crate::models::{Credentials, Role};
use crate::store::{store_login, use_app_store};

#[component]
pub fn LoginForm(role: Role) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (identifier, set_identifier) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let error = RwSignal::new(None::<String>);

    let identifier_label = if role == Role::Buyer { "Email" } else { "Username" };
    let input_type = if role == Role::Buyer { "email" } else { "text" };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = identifier.get();
        let secret = password.get();
        if id.trim().is_empty() || secret.is_empty() {
            error.set(Some(format!("Please enter your {} and password", identifier_label.to_lowercase())));
            return;
        }
        set_submitting.set(true);
        error.set(None);
        let api = ctx.api();
        spawn_local(async move {
            let credentials = Credentials::for_role(role, &id, &secret);
            match api.login(role, &credentials).await {
                Ok(response) if store_login(&store, &response) => {
                    ctx.toaster.success("Login successful!");
                    ctx.navigate(home_for(Some(role)));
                }
                Ok(response) => {
                    log::warn!("[login] response role {:?} does not match {}", response.role, role.as_str());
                    error.set(Some("Login failed. Please try again.".to_string()));
                }
                Err(e) => {
                    log::warn!("[login] {} login failed: {e}", role.as_str());
                    error.set(Some(e.user_message("Invalid credentials")));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="role-tabs">
                {Role::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <button
                            class="role-tab"
                            class:active=tab == role
                            on:click=move |_| ctx.navigate(Screen::Login(tab))
                        >
                            {tab.label()}
                        </button>
                    })
                    .collect_view()}
            </div>

            <form class="login-form" on:submit=submit>
                <h1>{format!("{} Login", role.label())}</h1>
                <ErrorBanner title="Login failed" message=error />
                <label>
                    {identifier_label}
                    <input
                        type=input_type
                        autocomplete="username"
                        prop:value=move || identifier.get()
                        on:input=move |ev| set_identifier.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
                <button type="button" class="btn-link" on:click=move |_| ctx.navigate(Screen::Home)>
                    "Back to home"
                </button>
            </form>
        </div>
    }
}
