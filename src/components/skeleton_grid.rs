//! Placeholder cards shown while a listing loads

use leptos::prelude::*;

#[component]
pub fn SkeletonGrid(#[prop(default = 8)] count: usize) -> impl IntoView {
    view! {
        <div class="product-grid">
            {(0..count).map(|index| view! {
                <div class="skeleton-card" style=format!("animation-delay: {}ms", index * 100)>
                    <div class="skeleton-media"></div>
                    <div class="skeleton-line short"></div>
                    <div class="skeleton-line"></div>
                    <div class="skeleton-line"></div>
                </div>
            }).collect_view()}
        </div>
    }
}
