//! Data models for product records, channel results and remote API payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw product fields collected from the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInput {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub tags: Vec<String>,
    pub materials: Vec<String>,
    pub images: Vec<String>,
    pub taxonomy_id: Option<u64>,
}

/// A validated, channel-agnostic product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub tags: Vec<String>,
    pub materials: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_id: Option<u64>,
}

/// Partial product used for updates; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<String>>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.tags.is_none()
            && self.materials.is_none()
    }
}

/// Outcome of a channel operation
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOperationResult {
    pub success: bool,
    pub listing_id: Option<String>,
    pub message: String,
    pub errors: Vec<String>,
}

impl ProductOperationResult {
    pub fn succeeded(listing_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            listing_id,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn failed(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            listing_id: None,
            message: message.into(),
            errors,
        }
    }
}

/// An image attached to a stored website product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub rank: usize,
}

/// The JSON document the website channel writes for each product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProduct {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_id: Option<u64>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredProduct {
    pub fn apply(&mut self, update: &ProductUpdate) {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            self.description.clone_from(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(tags) = &update.tags {
            self.tags.clone_from(tags);
        }
        if let Some(materials) = &update.materials {
            self.materials.clone_from(materials);
        }
    }

    pub fn catalogue_entry(&self) -> CatalogueEntry {
        CatalogueEntry {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Summary row in the website catalogue index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub quantity: i64,
}

/// A product as reported by a print-on-demand provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderProduct {
    pub id: u64,
    pub name: String,
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
    pub variants: Vec<ProviderVariant>,
}

/// A single purchasable variant of a provider product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderVariant {
    pub id: u64,
    pub name: String,
    pub retail_price: Option<f64>,
    pub sku: Option<String>,
}

/// Etsy listing creation/update body
#[derive(Debug, Serialize)]
pub struct EtsyListingPayload {
    pub quantity: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub who_made: &'static str,
    pub when_made: &'static str,
    pub taxonomy_id: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<String>,
}

/// Etsy image attachment body
#[derive(Debug, Serialize)]
pub struct EtsyImagePayload {
    pub url: String,
    pub rank: usize,
}

/// The part of an Etsy listing response we care about
#[derive(Debug, Deserialize)]
pub struct EtsyListingResponse {
    pub listing_id: u64,
}

/// Printful wraps every payload in `{ code, result }`
#[derive(Debug, Deserialize)]
pub struct PrintfulEnvelope<T> {
    pub result: T,
}

#[derive(Debug, Deserialize)]
pub struct PrintfulSyncProduct {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PrintfulSyncVariant {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub retail_price: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PrintfulProductInfo {
    pub sync_product: PrintfulSyncProduct,
    #[serde(default)]
    pub sync_variants: Vec<PrintfulSyncVariant>,
}
