//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is the
//! single in-memory owner of the session and both selection lists; the
//! helpers below run the storage-backed operations and publish the results,
//! so every component reading a field (cart badge, card buttons, cart panel)
//! updates together.

use chrono::Utc;
use leptos::prelude::*;
use leptos_toast::Toaster;
use reactive_stores::Store;

use crate::auth::AuthSession;
use crate::cart::{self, AddOutcome, ListChanged, ListKind, SelectionList};
use crate::models::{LoginResponse, Product, SelectionEntry};
use crate::storage::WebStorage;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Logged-in user, mirrored into session storage
    pub session: AuthSession,
    /// Cart entries, mirrored into local storage
    pub cart: Vec<SelectionEntry>,
    /// Collection-list entries, mirrored into local storage
    pub collection: Vec<SelectionEntry>,
}

impl AppState {
    /// Initial state from browser storage
    pub fn load() -> Self {
        let local = WebStorage::local();
        if let Err(e) = cart::migrate_legacy_cart(&local) {
            log::warn!("[store] legacy cart migration failed: {e}");
        }
        Self {
            session: AuthSession::restore(&WebStorage::session()),
            cart: SelectionList::new(local, ListKind::Cart).entries(),
            collection: SelectionList::new(local, ListKind::Collection).entries(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Storage-backed list whose writes are published into the store
fn selection_list(store: &AppStore, kind: ListKind) -> SelectionList<WebStorage> {
    let store = *store;
    SelectionList::new(WebStorage::local(), kind).with_observer(move |change| publish(&store, change))
}

fn publish(store: &AppStore, change: &ListChanged) {
    match change.kind {
        ListKind::Cart => *store.cart().write() = change.entries.clone(),
        ListKind::Collection => *store.collection().write() = change.entries.clone(),
    }
}

fn report_add(toaster: &Toaster, kind: ListKind, outcome: AddOutcome) {
    match outcome {
        AddOutcome::Added { .. } => toaster.success(format!("Added to {}!", kind.label())),
        AddOutcome::AlreadyPresent => toaster.info(format!("This item is already in your {}", kind.label())),
        AddOutcome::Full { capacity } => toaster.error(format!(
            "Cart is full! Maximum {capacity} items allowed. Please remove some before adding more."
        )),
    }
}

/// Re-read both lists, e.g. after another tab changed them
pub fn store_refresh_lists(store: &AppStore) {
    let local = WebStorage::local();
    *store.cart().write() = SelectionList::new(local, ListKind::Cart).entries();
    *store.collection().write() = SelectionList::new(local, ListKind::Collection).entries();
}

pub fn store_add_to_cart(store: &AppStore, toaster: &Toaster, product: &Product) {
    match selection_list(store, ListKind::Cart).add(product, Utc::now()) {
        Ok(outcome) => report_add(toaster, ListKind::Cart, outcome),
        Err(e) => {
            log::error!("[store] add to cart failed: {e}");
            toaster.error("Could not update your cart");
        }
    }
}

pub fn store_remove_from_cart(store: &AppStore, toaster: &Toaster, id: i64) {
    match selection_list(store, ListKind::Cart).remove(id) {
        Ok(true) => toaster.success("Removed from cart!"),
        Ok(false) => {}
        Err(e) => {
            log::error!("[store] remove from cart failed: {e}");
            toaster.error("Could not update your cart");
        }
    }
}

pub fn store_update_quantity(store: &AppStore, id: i64, quantity: i64) {
    if let Err(e) = selection_list(store, ListKind::Cart).update_quantity(id, quantity) {
        log::error!("[store] quantity update failed: {e}");
    }
}

pub fn store_clear_cart(store: &AppStore, toaster: &Toaster) {
    match selection_list(store, ListKind::Cart).clear() {
        Ok(()) => toaster.info("Cart cleared"),
        Err(e) => log::error!("[store] clearing cart failed: {e}"),
    }
}

pub fn store_remove_from_collection(store: &AppStore, id: i64) {
    if let Err(e) = selection_list(store, ListKind::Collection).remove(id) {
        log::error!("[store] remove from collection failed: {e}");
    }
}

/// Put a product on the collection list and in the cart
pub fn store_request_collection(store: &AppStore, toaster: &Toaster, product: &Product) {
    let collection = selection_list(store, ListKind::Collection);
    let cart = selection_list(store, ListKind::Cart);
    match cart::request_collection(&collection, &cart, product, Utc::now()) {
        Ok((collected, carted)) => {
            report_add(toaster, ListKind::Collection, collected);
            if let AddOutcome::Full { .. } = carted {
                report_add(toaster, ListKind::Cart, carted);
            }
        }
        Err(e) => {
            log::error!("[store] collection request failed: {e}");
            toaster.error("Could not update your collection list");
        }
    }
}

/// Adopt a login response. Returns false when the response was not usable.
pub fn store_login(store: &AppStore, response: &LoginResponse) -> bool {
    let mut session = AuthSession::default();
    if !session.login(response) {
        return false;
    }
    if let Err(e) = session.persist(&WebStorage::session()) {
        log::error!("[store] persisting session failed: {e}");
    }
    *store.session().write() = session;
    true
}

pub fn store_logout(store: &AppStore) {
    let mut session = store.session().get_untracked();
    session.logout();
    if let Err(e) = session.persist(&WebStorage::session()) {
        log::error!("[store] persisting logout failed: {e}");
    }
    *store.session().write() = session;
    log::info!("[store] logged out");
}
