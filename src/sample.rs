//! Sample donations shown when a listing comes back empty

use crate::models::Product;

const SAMPLES: &[(i64, &str, &str, &str, f64, &str)] = &[
    (
        1,
        "Fresh Vegetables Bundle",
        "Vegetables",
        "A bundle of fresh vegetables including carrots, tomatoes, and lettuce. Perfect for a healthy meal.",
        120.0,
        "https://images.unsplash.com/photo-1542838132-92c53300491e?q=80&w=1200&auto=format&fit=crop",
    ),
    (
        2,
        "Fruit Basket",
        "Fruits",
        "Assorted seasonal fruits including apples, oranges, and bananas. Rich in vitamins and nutrients.",
        150.0,
        "https://images.unsplash.com/photo-1576402187878-974f70c890a5?q=80&w=1200&auto=format&fit=crop",
    ),
    (
        3,
        "Homemade Bread",
        "Baked Goods",
        "Freshly baked whole wheat bread. Made with organic ingredients and no preservatives.",
        80.0,
        "https://images.unsplash.com/photo-1608198093002-ad4e005484ec?q=80&w=1200&auto=format&fit=crop",
    ),
    (
        4,
        "Dairy Pack",
        "Dairy",
        "Fresh milk, cheese, and yogurt pack from local farms. High in calcium and protein.",
        200.0,
        "https://images.unsplash.com/photo-1563636619-e9143da7973b?q=80&w=1200&auto=format&fit=crop",
    ),
];

pub fn sample_products() -> Vec<Product> {
    SAMPLES
        .iter()
        .map(|&(id, name, category, description, cost, image)| Product {
            id,
            name: name.to_string(),
            category: category.to_string(),
            description: Some(description.to_string()),
            cost,
            timer: None,
            created_at: None,
            image: Some(image.to_string()),
        })
        .collect()
}
