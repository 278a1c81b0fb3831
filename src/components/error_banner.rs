//! Dismissible inline error banner

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(
    #[prop(into)] title: String,
    message: RwSignal<Option<String>>,
) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="error-banner" role="alert">
                    <div class="error-body">
                        <p class="error-title">{title.clone()}</p>
                        <p class="error-text">{text}</p>
                    </div>
                    <button class="error-dismiss" title="Dismiss" on:click=move |_| message.set(None)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
