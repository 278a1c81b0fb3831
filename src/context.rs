//! Application Context
//!
//! Shared handles provided via Leptos Context API: the current screen, the
//! API configuration and the toaster.

use leptos::prelude::*;
use leptos_toast::Toaster;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::Role;

/// Top-level views
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Public landing page
    Home,
    Login(Role),
    BuyerHome,
    AdminHome,
    Cart,
}

/// Screen to show for a request, given the active role.
///
/// Screens that need a login fall back to the role's home.
pub fn resolve_screen(requested: Screen, role: Option<Role>) -> Screen {
    match (requested, role) {
        (Screen::BuyerHome | Screen::Cart, Some(Role::Buyer)) => requested,
        (Screen::AdminHome, Some(Role::Admin)) => requested,
        (Screen::Login(_), Some(role)) => home_for(Some(role)),
        (Screen::Home | Screen::Login(_), _) => requested,
        (_, role) => home_for(role),
    }
}

/// Landing screen for a role
pub fn home_for(role: Option<Role>) -> Screen {
    match role {
        Some(Role::Buyer) => Screen::BuyerHome,
        Some(Role::Admin) => Screen::AdminHome,
        Some(Role::Seller) | None => Screen::Home,
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Requested screen - read through `resolve_screen` before rendering
    pub screen: ReadSignal<Screen>,
    set_screen: WriteSignal<Screen>,
    config: StoredValue<AppConfig>,
    pub toaster: Toaster,
}

impl AppContext {
    pub fn new(screen: (ReadSignal<Screen>, WriteSignal<Screen>), config: AppConfig, toaster: Toaster) -> Self {
        Self {
            screen: screen.0,
            set_screen: screen.1,
            config: StoredValue::new(config),
            toaster,
        }
    }

    pub fn navigate(&self, screen: Screen) {
        log::debug!("[nav] {:?}", screen);
        self.set_screen.set(screen);
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Client bound to the browser session
    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.config())
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_screens_need_matching_role() {
        assert_eq!(resolve_screen(Screen::BuyerHome, None), Screen::Home);
        assert_eq!(resolve_screen(Screen::Cart, Some(Role::Admin)), Screen::AdminHome);
        assert_eq!(resolve_screen(Screen::AdminHome, Some(Role::Buyer)), Screen::BuyerHome);
        assert_eq!(resolve_screen(Screen::AdminHome, Some(Role::Admin)), Screen::AdminHome);
        assert_eq!(resolve_screen(Screen::Cart, Some(Role::Buyer)), Screen::Cart);
    }

    #[test]
    fn test_login_screen_skipped_when_logged_in() {
        assert_eq!(resolve_screen(Screen::Login(Role::Buyer), Some(Role::Buyer)), Screen::BuyerHome);
        assert_eq!(resolve_screen(Screen::Login(Role::Admin), None), Screen::Login(Role::Admin));
        assert_eq!(resolve_screen(Screen::Home, Some(Role::Seller)), Screen::Home);
    }
}
