//! Top navigation bar

use leptos::prelude::*;

use crate::context::{home_for, use_app_context, Screen};
use crate::models::Role;
use crate::store::{store_logout, use_app_store, AppStateStoreFields};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let role = Memo::new(move |_| store.session().with(|session| session.active_role()));
    let user_name = move || store.session().with(|session| session.display_name());
    let cart_len = move || store.cart().with(Vec::len);
    let collection_len = move || store.collection().with(Vec::len);

    let logout = move |_| {
        store_logout(&store);
        ctx.toaster.info("Logged out");
        ctx.navigate(Screen::Home);
    };

    view! {
        <nav class="nav-bar">
            <button class="nav-brand" on:click=move |_| ctx.navigate(home_for(role.get_untracked()))>
                "Food Rescue"
            </button>

            <div class="nav-actions">
                <Show when=move || role.get() == Some(Role::Buyer)>
                    <button class="nav-link" on:click=move |_| ctx.navigate(Screen::BuyerHome)>"Donations"</button>
                    <button class="nav-link cart-link" on:click=move |_| ctx.navigate(Screen::Cart)>
                        "Cart"
                        <Show when=move || cart_len() != 0>
                            <span class="badge">{cart_len}</span>
                        </Show>
                    </button>
                    <span class="nav-collection" title="Requested collections">
                        "Collections "
                        <span class="badge badge-muted">{collection_len}</span>
                    </span>
                </Show>

                <Show
                    when=move || role.get().is_some()
                    fallback=move || view! {
                        <div class="nav-logins">
                            {Role::ALL
                                .into_iter()
                                .map(|login_role| view! {
                                    <button class="nav-link" on:click=move |_| ctx.navigate(Screen::Login(login_role))>
                                        {format!("{} Login", login_role.label())}
                                    </button>
                                })
                                .collect_view()}
                        </div>
                    }
                >
                    <span class="nav-user">{user_name}</span>
                    <button class="btn btn-outline" on:click=logout>"Logout"</button>
                </Show>
            </div>
        </nav>
    }
}
