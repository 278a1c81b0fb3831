//! Two-step button for destructive actions

use leptos::prelude::*;

/// Shows `label`; the first click swaps in `question` with confirm and
/// cancel buttons, and only confirming runs `on_confirm`.
#[component]
pub fn ConfirmButton(
    #[prop(into)] label: String,
    #[prop(into)] question: String,
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);

    move || {
        if !armed.get() {
            return view! {
                <button class=button_class.clone() on:click=move |_| armed.set(true)>
                    {label.clone()}
                </button>
            }
            .into_any();
        }
        view! {
            <span class="confirm-prompt">
                <span class="confirm-text">{question.clone()}</span>
                <button
                    class="confirm-btn"
                    title="Confirm"
                    on:click=move |_| {
                        armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button class="cancel-btn" title="Cancel" on:click=move |_| armed.set(false)>
                    "✗"
                </button>
            </span>
        }
        .into_any()
    }
}
