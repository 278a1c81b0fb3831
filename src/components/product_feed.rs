//! Product Feed
//!
//! Fetch-and-reveal state shared by the listing screens.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::config::RevealDelays;
use crate::listing::{self, LoadPhase};
use crate::models::Product;

/// Tags each fetch so a response from a superseded request, or one arriving
/// after the screen unmounted, is dropped instead of applied
#[derive(Clone, Copy)]
pub struct FetchGuard {
    generation: StoredValue<u64>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self { generation: StoredValue::new(0) }
    }

    /// Start a new fetch, invalidating older ones
    pub fn begin(&self) -> u64 {
        self.generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or_default()
    }

    /// False once a newer fetch started or the owner was disposed
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.try_get_value() == Some(ticket)
    }
}

#[derive(Clone, Copy)]
pub struct ProductFeed {
    pub products: RwSignal<Vec<Product>>,
    pub phase: RwSignal<LoadPhase>,
    pub error: RwSignal<Option<String>>,
    guard: FetchGuard,
}

impl ProductFeed {
    pub fn new() -> Self {
        Self {
            products: RwSignal::new(Vec::new()),
            phase: RwSignal::new(LoadPhase::Loading),
            error: RwSignal::new(None),
            guard: FetchGuard::new(),
        }
    }

    /// Fetch, shuffle, then reveal text and images after the given delays
    pub fn fetch(&self, api: ApiClient, delays: RevealDelays) {
        let feed = *self;
        let ticket = feed.guard.begin();
        feed.phase.set(LoadPhase::Loading);
        spawn_local(async move {
            let result = api.view_all_products().await;
            if !feed.guard.is_current(ticket) {
                log::debug!("[feed] dropping stale response #{ticket}");
                return;
            }
            match result {
                Ok(products) => {
                    feed.products.set(listing::shuffle(products));
                    feed.error.set(None);
                }
                Err(e) => {
                    log::error!("[feed] fetching products failed: {e}");
                    let reason = e.user_message("Failed to fetch products");
                    feed.error.set(Some(format!("Failed to fetch products: {reason}")));
                    feed.phase.set(LoadPhase::Text);
                    return;
                }
            }

            TimeoutFuture::new(delays.text_ms).await;
            if !feed.guard.is_current(ticket) {
                return;
            }
            feed.phase.set(LoadPhase::Text);

            TimeoutFuture::new(delays.images_ms).await;
            if feed.guard.is_current(ticket) {
                feed.phase.set(LoadPhase::Images);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_fetch_invalidates_older_ticket() {
        let owner = Owner::new();
        owner.with(|| {
            let guard = FetchGuard::new();
            let first = guard.begin();
            assert!(guard.is_current(first));
            let second = guard.begin();
            assert!(!guard.is_current(first));
            assert!(guard.is_current(second));
        });
    }

    #[test]
    fn test_disposed_owner_drops_responses() {
        let owner = Owner::new();
        let (guard, ticket) = owner.with(|| {
            let guard = FetchGuard::new();
            let ticket = guard.begin();
            (guard, ticket)
        });
        assert!(guard.is_current(ticket));
        owner.cleanup();
        assert!(!guard.is_current(ticket));
        assert_eq!(guard.begin(), 0);
    }
}
