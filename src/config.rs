//! Application Configuration
//!
//! Values baked in at build time, with defaults for local development.

use log::LevelFilter;

/// Backend used when `FOOD_RESCUE_API_URL` is not set at build time
const DEFAULT_API_URL: &str = "http://localhost:2030";

/// Maximum distinct entries in the cart
pub const CART_CAPACITY: usize = 10;

/// Per-request timeout
const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Delays for the two-phase card reveal (text first, then images)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealDelays {
    pub text_ms: u32,
    pub images_ms: u32,
}

pub const HOME_REVEAL: RevealDelays = RevealDelays { text_ms: 1500, images_ms: 1000 };
pub const BUYER_REVEAL: RevealDelays = RevealDelays { text_ms: 2000, images_ms: 1500 };

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API base URL without trailing slash
    pub api_url: String,
    pub request_timeout_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, "info")
    }
}

impl AppConfig {
    pub fn new(api_url: &str, log_level: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            log_level: console_logger::parse_level(log_level),
        }
    }

    /// Read `FOOD_RESCUE_API_URL` and `FOOD_RESCUE_LOG` from the build environment
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("FOOD_RESCUE_API_URL").unwrap_or(DEFAULT_API_URL),
            option_env!("FOOD_RESCUE_LOG").unwrap_or("info"),
        )
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = AppConfig::new("https://api.example.org/", "debug");
        assert_eq!(config.endpoint("/product/viewallproducts"), "https://api.example.org/product/viewallproducts");
        assert_eq!(config.endpoint("admin/viewallbuyers"), "https://api.example.org/admin/viewallbuyers");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
