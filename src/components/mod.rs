//! UI Components
//!
//! Screens and the pieces they share.

mod admin_home;
mod buyer_home;
mod cart_panel;
pub mod charts;
mod confirm_button;
mod error_banner;
mod food_item_card;
pub mod home;
mod login_form;
mod nav_bar;
pub mod product_feed;
mod skeleton_grid;

pub use admin_home::AdminHome;
pub use buyer_home::BuyerHome;
pub use cart_panel::CartPanel;
pub use confirm_button::ConfirmButton;
pub use error_banner::ErrorBanner;
pub use food_item_card::{CardMode, FoodItemCard};
pub use home::Home;
pub use login_form::LoginForm;
pub use nav_bar::NavBar;
pub use product_feed::ProductFeed;
pub use skeleton_grid::SkeletonGrid;
