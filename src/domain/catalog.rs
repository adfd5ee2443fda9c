//! Client-side product lookup helpers.
//!
//! The backend returns the full product and category sets in one call; the
//! billing view narrows them locally as the user types. These are pure
//! functions over already-fetched data.

use crate::api::Product;

/// Categories whose name contains `query`, ignoring case.
///
/// An empty query returns every category.
#[must_use]
pub fn categories_matching<'a>(categories: &'a [String], query: &str) -> Vec<&'a str> {
    if query.is_empty() {
        return categories.iter().map(String::as_str).collect();
    }

    let query = query.to_lowercase();

    categories
        .iter()
        .filter(|category| category.to_lowercase().contains(&query))
        .map(String::as_str)
        .collect()
}

/// Products belonging to the given category.
#[must_use]
pub fn products_in_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| product.category == category)
        .collect()
}

/// Products whose name or brand contains `query`, ignoring case.
///
/// An empty query returns every product.
#[must_use]
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.is_empty() {
        return products.iter().collect();
    }

    let query = query.to_lowercase();

    products
        .iter()
        .filter(|product| {
            product.product_name.to_lowercase().contains(&query)
                || product.brand.to_lowercase().contains(&query)
        })
        .collect()
}
