//! Recipient Dashboard
//!
//! Listing with statistics, category and text filters, and cart/collection
//! actions. Expired donations are hidden.

use chrono::Local;
use leptos::ev;
use leptos::prelude::*;

use crate::components::{CardMode, ErrorBanner, FoodItemCard, ProductFeed, SkeletonGrid};
use crate::config::BUYER_REVEAL;
use crate::context::use_app_context;
use crate::listing::{self, ListingFilter, LoadPhase};
use crate::sample::sample_products;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BuyerHome() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let feed = ProductFeed::new();
    feed.fetch(ctx.api(), BUYER_REVEAL);

    // Coming back through the back/forward cache keeps the old list around
    let handle = window_event_listener(ev::pageshow, move |event| {
        if event.persisted() {
            log::debug!("[buyer] page restored from cache, refetching");
            feed.fetch(ctx.api(), BUYER_REVEAL);
        }
    });
    on_cleanup(move || handle.remove());

    let (category, set_category) = signal(String::new());
    let (search, set_search) = signal(String::new());

    let categories = Memo::new(move |_| feed.products.with(|products| listing::categories(products)));
    let stats = Memo::new(move |_| {
        let now = Local::now().naive_local();
        feed.products.with(|products| listing::stats(products, now))
    });
    let visible = Memo::new(move |_| {
        let filter = ListingFilter { category: category.get(), search: search.get() };
        let now = Local::now().naive_local();
        feed.products.with(|products| listing::filter_products(products, &filter, now))
    });
    let showing_samples = move || visible.with(Vec::is_empty) && feed.error.with(Option::is_none);
    let shown = move || if showing_samples() { sample_products() } else { visible.get() };

    let welcome = move || store.session().with(|session| session.display_name());
    let phase = feed.phase;

    view! {
        <div class="buyer-home">
            <section class="buyer-header">
                <h1>"Welcome, " {welcome}</h1>
                <p>"Browse available donations and request a collection."</p>
            </section>

            <section class="stats-row">
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().total}</span>
                    <span class="stat-label">"Total Donations"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().active}</span>
                    <span class="stat-label">"Available"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().expired}</span>
                    <span class="stat-label">"Expired"</span>
                </div>
            </section>

            <section class="filters">
                <select
                    class="category-select"
                    prop:value=move || category.get()
                    on:change=move |ev| set_category.set(event_target_value(&ev))
                >
                    <option value="">"All Categories"</option>
                    <For
                        each=move || categories.get()
                        key=|name| name.clone()
                        children=|name| {
                            let value = name.clone();
                            view! { <option value=value>{name}</option> }
                        }
                    />
                </select>
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search donations..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
            </section>

            <ErrorBanner title="Error" message=feed.error />

            <Show when=move || phase.get() != LoadPhase::Loading fallback=|| view! { <SkeletonGrid /> }>
                <Show when=showing_samples>
                    <p class="sample-notice">"No donations match right now. Here are some sample items."</p>
                </Show>
                <div class="product-grid">
                    <For
                        each=shown
                        key=|product| product.id
                        children=move |product| view! {
                            <FoodItemCard product=product phase=phase mode=CardMode::Buyer />
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
