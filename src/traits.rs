//! Traits and interfaces for channel-agnostic publishing

use async_trait::async_trait;

use crate::models::{Product, ProductOperationResult, ProductUpdate, ProviderProduct};

/// A storefront a product can be published to
///
/// Implementations never return errors: every failure is reported through a
/// failed [`ProductOperationResult`].
#[async_trait]
pub trait SalesChannel: Send + Sync {
    /// Display name used in messages and logs
    fn name(&self) -> &'static str;

    /// Publish a new listing
    ///
    /// # Returns
    /// * `ProductOperationResult` - carries the channel-assigned listing id on success
    async fn create_listing(&self, product: &Product) -> ProductOperationResult;

    /// Change some fields of an existing listing
    ///
    /// # Arguments
    /// * `listing_id` - The id returned by `create_listing`
    /// * `update` - Fields to change; absent fields are left untouched
    async fn update_listing(&self, listing_id: &str, update: &ProductUpdate)
    -> ProductOperationResult;

    /// Attach images to an existing listing, ranked in the order given
    async fn upload_images(&self, listing_id: &str, urls: &[String]) -> ProductOperationResult;

    /// Whether every credential the channel needs is present
    fn is_configured(&self) -> bool;
}

/// A print-on-demand fulfilment provider
///
/// Lookups degrade instead of failing: a transport error yields an empty
/// list or `None` and is logged.
#[async_trait]
pub trait PrintProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn get_products(&self) -> Vec<ProviderProduct>;

    async fn get_product_info(&self, product_id: u64) -> Option<ProviderProduct>;

    fn is_configured(&self) -> bool;
}
