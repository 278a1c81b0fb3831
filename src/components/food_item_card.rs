//! Food Item Card
//!
//! One donation in a listing grid. Guests are sent to the login screen on
//! any interaction; buyers get cart and collection actions.

use leptos::prelude::*;

use crate::api::product_image_url;
use crate::components::home::prompt_login;
use crate::context::use_app_context;
use crate::listing::{self, LoadPhase};
use crate::models::Product;
use crate::store::{store_add_to_cart, store_remove_from_cart, store_request_collection, use_app_store, AppStateStoreFields};

/// Who is looking at the card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardMode {
    Guest,
    Buyer,
}

#[component]
pub fn FoodItemCard(
    product: Product,
    #[prop(into)] phase: Signal<LoadPhase>,
    mode: CardMode,
    /// Highlighted in the featured row
    #[prop(optional)]
    featured: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = product.id;

    let first_image = product
        .image
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| product_image_url(&ctx.config(), id));
    let image_src = RwSignal::new(Some(first_image));
    let category = product.category.clone();
    let name = product.name.clone();
    let on_image_error = move |_: web_sys::ErrorEvent| {
        image_src.update(|src| {
            *src = src
                .as_deref()
                .and_then(|current| listing::next_image_fallback(current, &category, &name));
        });
    };

    let in_cart = Memo::new(move |_| store.cart().with(|entries| entries.iter().any(|e| e.id == id)));
    let in_collection = Memo::new(move |_| store.collection().with(|entries| entries.iter().any(|e| e.id == id)));

    let text_visible = move || phase.get() != LoadPhase::Loading;
    let images_visible = move || phase.get() == LoadPhase::Images;

    let alt = product.name.clone();
    let expiry = listing::format_expiry(&product);
    let amount = listing::format_amount(product.cost);
    let description = product.description.clone().unwrap_or_default();

    let on_details = move |_: web_sys::MouseEvent| {
        if mode == CardMode::Guest {
            prompt_login(ctx, "view product details");
        }
    };

    let actions = match mode {
        CardMode::Guest => view! {
            <div class="food-card-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        prompt_login(ctx, "add items to cart");
                    }
                >
                    "Add to Cart"
                </button>
            </div>
        }
        .into_any(),
        CardMode::Buyer => {
            let product = StoredValue::new(product.clone());
            view! {
                <div class="food-card-actions">
                    <Show
                        when=move || in_cart.get()
                        fallback=move || view! {
                            <button
                                class="btn btn-primary"
                                on:click=move |_| product.with_value(|p| store_add_to_cart(&store, &ctx.toaster, p))
                            >
                                "Add to Cart"
                            </button>
                        }
                    >
                        <button class="btn btn-outline" on:click=move |_| store_remove_from_cart(&store, &ctx.toaster, id)>
                            "Remove from Cart"
                        </button>
                    </Show>
                    <button
                        class="btn btn-secondary"
                        disabled=move || in_collection.get()
                        on:click=move |_| product.with_value(|p| store_request_collection(&store, &ctx.toaster, p))
                    >
                        {move || if in_collection.get() { "Collection Requested" } else { "Request Collection" }}
                    </button>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div
            class="food-card"
            class:featured=featured
            class:revealed=text_visible
            class:in-cart=move || in_cart.get()
        >
            <div class="food-card-media" on:click=on_details>
                {move || {
                    if !images_visible() {
                        return view! { <div class="image-pending">"Loading image..."</div> }.into_any();
                    }
                    match image_src.get() {
                        Some(src) => view! {
                            <img src=src alt=alt.clone() loading="lazy" on:error=on_image_error.clone() />
                        }
                        .into_any(),
                        None => view! { <div class="image-missing">{alt.clone()}</div> }.into_any(),
                    }
                }}
                <span class="food-card-category">{product.category.clone()}</span>
                <span class="food-card-amount">{amount}</span>
            </div>
            <div class="food-card-body">
                <h3 class="food-card-title" title=product.name.clone()>{product.name.clone()}</h3>
                <p class="food-card-description">{description}</p>
                {expiry.map(|at| view! { <p class="food-card-expiry">"Expires: " {at}</p> })}
                {actions}
            </div>
        </div>
    }
}
