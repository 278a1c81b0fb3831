//! Food Rescue Frontend App
//!
//! Root component: provides the store and context, keeps the lists in step
//! with other tabs and switches between screens.

use leptos::ev;
use leptos::prelude::*;
use leptos_toast::{ToastHost, Toaster};
use reactive_stores::Store;

use crate::components::{AdminHome, BuyerHome, CartPanel, Home, LoginForm, NavBar};
use crate::config::AppConfig;
use crate::context::{home_for, resolve_screen, AppContext, Screen};
use crate::storage::keys;
use crate::store::{store_refresh_lists, AppState, AppStateStoreFields};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let state = AppState::load();
    let initial = home_for(state.session.active_role());
    let store = Store::new(state);
    let toaster = Toaster::new();

    provide_context(store);
    let ctx = AppContext::new(signal(initial), config, toaster);
    provide_context(ctx);

    // Another tab wrote the cart or the collection list
    let _ = window_event_listener(ev::storage, move |event| {
        let relevant = match event.key() {
            Some(key) => key == keys::CART_ITEMS || key == keys::COLLECT_ITEMS,
            // storage.clear()
            None => true,
        };
        if relevant {
            log::debug!("[app] lists changed in another tab");
            store_refresh_lists(&store);
        }
    });

    let screen = Memo::new(move |_| {
        let role = store.session().with(|session| session.active_role());
        resolve_screen(ctx.screen.get(), role)
    });

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                <ErrorBoundary fallback=|errors| {
                    for (_, error) in errors.get() {
                        log::error!("[app] unhandled error: {error}");
                    }
                    view! {
                        <div class="error-fallback">
                            <h2>"Something went wrong. Please try again later."</h2>
                            <details>
                                <summary>"Details"</summary>
                                <pre class="log-tail">{console_logger::recent_lines().join("\n")}</pre>
                            </details>
                        </div>
                    }
                }>
                    {move || match screen.get() {
                        Screen::Home => view! { <Home /> }.into_any(),
                        Screen::Login(role) => view! { <LoginForm role=role /> }.into_any(),
                        Screen::BuyerHome => view! { <BuyerHome /> }.into_any(),
                        Screen::AdminHome => view! { <AdminHome /> }.into_any(),
                        Screen::Cart => view! { <CartPanel /> }.into_any(),
                    }}
                </ErrorBoundary>
            </main>
            <ToastHost toaster=toaster />
        </div>
    }
}
