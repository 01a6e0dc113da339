//! Field-level product validation
//!
//! Every rule is checked independently and all violations are collected,
//! so a single run reports everything wrong with the input. Violations are
//! plain strings meant for direct display.

use crate::models::{Product, ProductInput, ProductUpdate};

pub const MAX_TITLE_CHARS: usize = 140;
pub const MAX_TAGS: usize = 13;
pub const MAX_TAG_CHARS: usize = 20;

/// Checks a product input against the listing rules.
///
/// Returns an empty vector when the input is acceptable.
pub fn validate_product_input(input: &ProductInput) -> Vec<String> {
    let mut errors = Vec::new();

    check_title(&input.title, &mut errors);
    check_description(&input.description, &mut errors);

    match input.price {
        Some(price) => check_price(price, &mut errors),
        None => errors.push("Price is required".to_string()),
    }

    match input.quantity {
        Some(quantity) => check_quantity(quantity, &mut errors),
        None => errors.push("Quantity is required".to_string()),
    }

    check_tags(&input.tags, &mut errors);

    errors
}

/// Checks only the fields present in a partial update.
pub fn validate_product_update(update: &ProductUpdate) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(title) = &update.title {
        check_title(title, &mut errors);
    }
    if let Some(description) = &update.description {
        check_description(description, &mut errors);
    }
    if let Some(price) = update.price {
        check_price(price, &mut errors);
    }
    if let Some(quantity) = update.quantity {
        check_quantity(quantity, &mut errors);
    }
    if let Some(tags) = &update.tags {
        check_tags(tags, &mut errors);
    }

    errors
}

/// Builds a trimmed [`Product`] from the input.
///
/// Does not re-check any rule: call [`validate_product_input`] first.
/// Missing price or quantity become zero.
pub fn to_product(input: &ProductInput) -> Product {
    Product {
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        price: input.price.unwrap_or_default(),
        quantity: input.quantity.unwrap_or_default(),
        tags: trim_all(&input.tags),
        materials: trim_all(&input.materials),
        taxonomy_id: input.taxonomy_id,
    }
}

/// Trims the text and list fields of a partial update.
pub fn normalize_update(update: ProductUpdate) -> ProductUpdate {
    ProductUpdate {
        title: update.title.map(|t| t.trim().to_string()),
        description: update.description.map(|d| d.trim().to_string()),
        tags: update.tags.as_deref().map(trim_all),
        materials: update.materials.as_deref().map(trim_all),
        ..update
    }
}

fn trim_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.trim().to_string()).collect()
}

fn check_title(title: &str, errors: &mut Vec<String>) {
    let title = title.trim();
    if title.is_empty() {
        errors.push("Title is required".to_string());
    } else if title.chars().count() > MAX_TITLE_CHARS {
        errors.push(format!(
            "Title must be {MAX_TITLE_CHARS} characters or less"
        ));
    }
}

fn check_description(description: &str, errors: &mut Vec<String>) {
    if description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }
}

fn check_price(price: f64, errors: &mut Vec<String>) {
    if !price.is_finite() {
        errors.push("Price must be a finite number".to_string());
    } else if price <= 0.0 {
        errors.push("Price must be greater than 0".to_string());
    }
}

fn check_quantity(quantity: i64, errors: &mut Vec<String>) {
    if quantity < 0 {
        errors.push("Quantity must be 0 or greater".to_string());
    }
}

fn check_tags(tags: &[String], errors: &mut Vec<String>) {
    if tags.len() > MAX_TAGS {
        errors.push(format!("Maximum {MAX_TAGS} tags allowed"));
    }

    for (index, tag) in tags.iter().enumerate() {
        if tag.trim().chars().count() > MAX_TAG_CHARS {
            errors.push(format!(
                "Tag {} must be {MAX_TAG_CHARS} characters or less",
                index + 1
            ));
        }
    }
}
