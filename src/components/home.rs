//! Public landing page
//!
//! Shows a shuffled listing to guests. Any interaction asks the visitor to
//! log in as a recipient.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ErrorBanner, FoodItemCard, CardMode, ProductFeed, SkeletonGrid};
use crate::config::HOME_REVEAL;
use crate::context::{use_app_context, AppContext, Screen};
use crate::listing::{self, LoadPhase, FEATURED_COUNT};
use crate::models::Role;

/// Pause between the login prompt and the switch to the login screen
const LOGIN_REDIRECT_MS: u32 = 1000;

/// Tell a guest to log in, then open the recipient login screen
pub fn prompt_login(ctx: AppContext, action: &str) {
    ctx.toaster.info(format!("Please login to {action}"));
    spawn_local(async move {
        TimeoutFuture::new(LOGIN_REDIRECT_MS).await;
        ctx.navigate(Screen::Login(Role::Buyer));
    });
}

#[component]
pub fn Home() -> impl IntoView {
    let ctx = use_app_context();
    let feed = ProductFeed::new();
    feed.fetch(ctx.api(), HOME_REVEAL);

    let sections = Memo::new(move |_| listing::split_featured(feed.products.get(), FEATURED_COUNT));
    let phase = feed.phase;

    view! {
        <div class="home-page">
            <section class="hero">
                <h1>"Rescue food. Feed people."</h1>
                <p>"Donors share surplus food, recipients collect it before it goes to waste."</p>
                <div class="hero-actions">
                    <button class="btn btn-primary" on:click=move |_| ctx.navigate(Screen::Login(Role::Buyer))>
                        "Find Food"
                    </button>
                    <button class="btn btn-outline" on:click=move |_| ctx.navigate(Screen::Login(Role::Seller))>
                        "Donate Food"
                    </button>
                </div>
            </section>

            <ErrorBanner title="Error" message=feed.error />

            <Show when=move || phase.get() != LoadPhase::Loading fallback=|| view! { <SkeletonGrid /> }>
                <Show
                    when=move || !feed.products.with(Vec::is_empty)
                    fallback=|| view! { <p class="empty-state">"No donations available right now."</p> }
                >
                    <section class="featured">
                        <h2>"Featured Donations"</h2>
                        <div class="product-grid">
                            <For
                                each=move || sections.get().0
                                key=|product| product.id
                                children=move |product| view! {
                                    <FoodItemCard product=product phase=phase mode=CardMode::Guest featured=true />
                                }
                            />
                        </div>
                    </section>
                    <Show when=move || !sections.with(|(_, rest)| rest.is_empty())>
                        <section class="all-donations">
                            <h2>"All Donations"</h2>
                            <div class="product-grid">
                                <For
                                    each=move || sections.get().1
                                    key=|product| product.id
                                    children=move |product| view! {
                                        <FoodItemCard product=product phase=phase mode=CardMode::Guest />
                                    }
                                />
                            </div>
                        </section>
                    </Show>
                </Show>
            </Show>
        </div>
    }
}
