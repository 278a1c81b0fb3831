//! Listing Helpers
//!
//! Pure functions behind the product screens: expiry, filtering, statistics,
//! ordering and image fallbacks. Nothing here touches the network.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Product;

/// Number of shuffled products shown in the Home "featured" row
pub const FEATURED_COUNT: usize = 4;

/// Image used when a category has no dedicated placeholder
const DEFAULT_PLACEHOLDER: &str =
    "https://images.unsplash.com/photo-1490645935967-10de6ba17061?q=80&w=1200&auto=format&fit=crop";

const CATEGORY_PLACEHOLDERS: &[(&str, &str)] = &[
    ("Vegetables", "https://images.unsplash.com/photo-1542838132-92c53300491e?q=80&w=1200&auto=format&fit=crop"),
    ("Fruits", "https://images.unsplash.com/photo-1576402187878-974f70c890a5?q=80&w=1200&auto=format&fit=crop"),
    ("Baked Goods", "https://images.unsplash.com/photo-1509440159596-0249088772ff?q=80&w=1200&auto=format&fit=crop"),
    ("Dairy", "https://images.unsplash.com/photo-1542831371-29b0f74f9713?q=80&w=1200&auto=format&fit=crop"),
    ("Others", DEFAULT_PLACEHOLDER),
];

/// Progressive reveal of a freshly fetched list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    /// Skeleton cards
    Loading,
    /// Card text visible, images still pending
    Text,
    Images,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingFilter {
    /// Case-insensitive substring of the category, empty for all
    pub category: String,
    /// Case-insensitive substring of name or description
    pub search: String,
}

impl ListingFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category = self.category.trim().to_lowercase();
        let search = self.search.trim().to_lowercase();
        let category_ok = category.is_empty() || product.category.to_lowercase().contains(&category);
        let search_ok = search.is_empty()
            || product.name.to_lowercase().contains(&search)
            || product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&search));
        category_ok && search_ok
    }
}

/// Drop expired products, then apply the filter
pub fn filter_products(products: &[Product], filter: &ListingFilter, now: NaiveDateTime) -> Vec<Product> {
    products
        .iter()
        .filter(|p| !p.is_expired(now))
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

/// Unique non-empty categories in order of first appearance
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| p.category.clone())
        .filter(|c| !c.is_empty() && seen.insert(c.clone()))
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListingStats {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
}

pub fn stats(products: &[Product], now: NaiveDateTime) -> ListingStats {
    let expired = products.iter().filter(|p| p.is_expired(now)).count();
    ListingStats {
        total: products.len(),
        active: products.len() - expired,
        expired,
    }
}

pub fn shuffle(products: Vec<Product>) -> Vec<Product> {
    shuffle_with(products, &mut rand::thread_rng())
}

pub fn shuffle_with<R: Rng + ?Sized>(mut products: Vec<Product>, rng: &mut R) -> Vec<Product> {
    products.shuffle(rng);
    products
}

/// Split off the first `count` products as featured
pub fn split_featured(mut products: Vec<Product>, count: usize) -> (Vec<Product>, Vec<Product>) {
    let rest = products.split_off(count.min(products.len()));
    (products, rest)
}

/// Stable stand-in image for a category
pub fn placeholder_image(category: &str) -> &'static str {
    CATEGORY_PLACEHOLDERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category.trim()))
        .map(|(_, url)| *url)
        .unwrap_or(DEFAULT_PLACEHOLDER)
}

/// Last-resort image showing the product name, used if the category
/// placeholder fails to load as well
pub fn text_placeholder(name: &str) -> String {
    let label = if name.trim().is_empty() { "Food Item" } else { name.trim() };
    format!(
        "https://via.placeholder.com/600x400/f0fdf0/166534?text={}",
        utf8_percent_encode(label, NON_ALPHANUMERIC)
    )
}

/// Next image to try after `current` failed to load: the category
/// placeholder, then the name placeholder, then nothing
pub fn next_image_fallback(current: &str, category: &str, name: &str) -> Option<String> {
    let by_category = placeholder_image(category);
    let by_name = text_placeholder(name);
    if current == by_name {
        None
    } else if current == by_category {
        Some(by_name)
    } else {
        Some(by_category.to_string())
    }
}

/// Offered amount, e.g. "2.5 kg" or "3 kg"
pub fn format_amount(cost: f64) -> String {
    if cost.fract() == 0.0 {
        format!("{cost:.0} kg")
    } else {
        format!("{cost:.1} kg")
    }
}

/// Human readable expiry, e.g. "01 Mar 2025, 11:00"
pub fn format_expiry(product: &Product) -> Option<String> {
    product.expires_at().map(|at| at.format("%d %b %Y, %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn product(id: i64, name: &str, category: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            category: category.to_string(),
            description: None,
            cost: 1.0,
            timer: None,
            created_at: None,
            image: None,
        }
    }

    fn timed(id: i64, minutes_ago: i64) -> Product {
        Product {
            timer: Some(60),
            created_at: Some(now() - Duration::minutes(minutes_ago)),
            ..product(id, "Curry", "Others")
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let products = vec![timed(1, 61), timed(2, 59)];
        let visible = filter_products(&products, &ListingFilter::default(), now());
        assert_eq!(visible.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_huge_timer_is_listed_without_expiry() {
        let product = Product { timer: Some(200_000_000_000), ..timed(3, 0) };
        let kept = filter_products(&[product.clone()], &ListingFilter::default(), now());
        assert_eq!(kept.len(), 1);
        assert_eq!(stats(&[product.clone()], now()).expired, 0);
        assert_eq!(format_expiry(&product), None);
    }

    #[test]
    fn test_category_substring_and_search() {
        let mut bread = product(1, "Sourdough", "Baked Goods");
        bread.description = Some("Whole wheat loaf".into());
        let products = vec![bread, product(2, "Apples", "Fruits"), product(3, "Wheat flour", "Others")];

        let filter = ListingFilter { category: "baked".into(), search: String::new() };
        assert_eq!(filter_products(&products, &filter, now()).len(), 1);

        let filter = ListingFilter { category: String::new(), search: "WHEAT".into() };
        let ids: Vec<_> = filter_products(&products, &filter, now()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let filter = ListingFilter { category: "fruit".into(), search: "wheat".into() };
        assert!(filter_products(&products, &filter, now()).is_empty());
    }

    #[test]
    fn test_categories_unique_in_order() {
        let products = vec![
            product(1, "a", "Fruits"),
            product(2, "b", ""),
            product(3, "c", "Dairy"),
            product(4, "d", "Fruits"),
        ];
        assert_eq!(categories(&products), vec!["Fruits".to_string(), "Dairy".to_string()]);
    }

    #[test]
    fn test_stats() {
        let products = vec![timed(1, 90), timed(2, 10), product(3, "Rice", "Others")];
        assert_eq!(stats(&products, now()), ListingStats { total: 3, active: 2, expired: 1 });
    }

    #[test]
    fn test_shuffle_keeps_every_product() {
        let products: Vec<_> = (1..=20).map(|id| product(id, "x", "Others")).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut ids: Vec<_> = shuffle_with(products, &mut rng).iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_featured() {
        let products: Vec<_> = (1..=6).map(|id| product(id, "x", "Others")).collect();
        let (featured, rest) = split_featured(products, FEATURED_COUNT);
        assert_eq!(featured.len(), 4);
        assert_eq!(rest.len(), 2);

        let (featured, rest) = split_featured(vec![product(1, "x", "Others")], FEATURED_COUNT);
        assert_eq!(featured.len(), 1);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        assert_eq!(placeholder_image("Dairy"), placeholder_image("dairy"));
        assert_ne!(placeholder_image("Dairy"), placeholder_image("Fruits"));
        assert_eq!(placeholder_image("Mystery"), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_text_placeholder_is_encoded() {
        assert_eq!(
            text_placeholder("Rice & Dal"),
            "https://via.placeholder.com/600x400/f0fdf0/166534?text=Rice%20%26%20Dal"
        );
        assert!(text_placeholder("  ").ends_with("text=Food%20Item"));
    }

    #[test]
    fn test_image_fallback_chain() {
        let first = next_image_fallback("http://api/product/displayproductimage?id=1", "Fruits", "Mango").unwrap();
        assert_eq!(first, placeholder_image("Fruits"));
        let second = next_image_fallback(&first, "Fruits", "Mango").unwrap();
        assert_eq!(second, text_placeholder("Mango"));
        assert_eq!(next_image_fallback(&second, "Fruits", "Mango"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(3.0), "3 kg");
        assert_eq!(format_amount(2.5), "2.5 kg");
    }
}
