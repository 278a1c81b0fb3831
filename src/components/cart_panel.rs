//! Cart Panel
//!
//! Cart entries with quantity controls and the total, followed by the
//! collection list.

use leptos::prelude::*;

use crate::cart::{total_price, total_quantity};
use crate::components::ConfirmButton;
use crate::config::CART_CAPACITY;
use crate::context::{use_app_context, Screen};
use crate::listing;
use crate::models::SelectionEntry;
use crate::store::{
    store_clear_cart, store_remove_from_cart, store_remove_from_collection, store_update_quantity, use_app_store,
    AppStateStoreFields,
};

#[component]
pub fn CartPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let total = move || store.cart().with(|entries| total_price(entries));
    let count = move || store.cart().with(|entries| total_quantity(entries));
    let is_empty = move || store.cart().with(Vec::is_empty);

    view! {
        <div class="cart-panel">
            <header class="cart-header">
                <h1>"Your Cart"</h1>
                <span class="cart-capacity">
                    {move || format!("{} / {} items", store.cart().with(Vec::len), CART_CAPACITY)}
                </span>
                <button class="btn btn-outline" on:click=move |_| ctx.navigate(Screen::BuyerHome)>
                    "Continue Browsing"
                </button>
            </header>

            <Show
                when=move || !is_empty()
                fallback=|| view! { <p class="empty-state">"Your cart is empty."</p> }
            >
                <ul class="cart-list">
                    <For
                        each=move || store.cart().get()
                        key=|entry| (entry.id, entry.quantity)
                        children=move |entry| view! { <CartRow entry=entry /> }
                    />
                </ul>
                <footer class="cart-summary">
                    <span class="cart-count">{move || format!("{} units", count())}</span>
                    <span class="cart-total">{move || format!("Total: {:.2}", total())}</span>
                    <ConfirmButton
                        label="Clear Cart"
                        question="Remove everything?"
                        button_class="btn btn-danger"
                        on_confirm=move |_| store_clear_cart(&store, &ctx.toaster)
                    />
                </footer>
            </Show>

            <section class="collection-list">
                <h2>"Requested Collections"</h2>
                <Show
                    when=move || !store.collection().with(Vec::is_empty)
                    fallback=|| view! { <p class="empty-state">"No collection requests yet."</p> }
                >
                    <ul>
                        <For
                            each=move || store.collection().get()
                            key=|entry| entry.id
                            children=move |entry| {
                                let id = entry.id;
                                view! {
                                    <li class="collection-row">
                                        <span class="collection-name">{entry.name}</span>
                                        <span class="collection-category">{entry.category}</span>
                                        <span class="collection-amount">{listing::format_amount(entry.cost)}</span>
                                        <button class="btn-icon" title="Remove" on:click=move |_| store_remove_from_collection(&store, id)>
                                            "×"
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </section>
        </div>
    }
}

#[component]
fn CartRow(entry: SelectionEntry) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = entry.id;
    let quantity = i64::from(entry.quantity);
    let subtotal = entry.subtotal();

    view! {
        <li class="cart-row">
            {entry.image.clone().map(|src| view! { <img class="cart-thumb" src=src alt=entry.name.clone() /> })}
            <div class="cart-row-info">
                <span class="cart-row-name">{entry.name.clone()}</span>
                <span class="cart-row-category">{entry.category.clone()}</span>
            </div>
            <div class="quantity-control">
                <button class="btn-icon" on:click=move |_| store_update_quantity(&store, id, quantity - 1)>"−"</button>
                <span class="quantity">{quantity}</span>
                <button class="btn-icon" on:click=move |_| store_update_quantity(&store, id, quantity + 1)>"+"</button>
            </div>
            <span class="cart-row-subtotal">{format!("{subtotal:.2}")}</span>
            <button class="btn-icon remove" title="Remove" on:click=move |_| store_remove_from_cart(&store, &ctx.toaster, id)>
                "×"
            </button>
        </li>
    }
}
