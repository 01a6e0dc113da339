//! Etsy Open API v3 channel

use anyhow::Result;
use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, error, info};

use crate::config::EtsyConfig;
use crate::error::RequestError;
use crate::models::{
    EtsyImagePayload, EtsyListingPayload, EtsyListingResponse, Product, ProductOperationResult,
    ProductUpdate,
};
use crate::traits::SalesChannel;

const SERVICE: &str = "Etsy";
const WHO_MADE: &str = "i_did";
const WHEN_MADE: &str = "made_to_order";
const DEFAULT_TAXONOMY_ID: u64 = 1;

/// Publishes listings to an Etsy shop
pub struct EtsyChannel {
    client: Client,
    config: EtsyConfig,
}

impl EtsyChannel {
    pub fn new(config: &EtsyConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Maps a product onto Etsy's listing creation body.
    pub fn listing_payload(product: &Product) -> EtsyListingPayload {
        EtsyListingPayload {
            quantity: product.quantity,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            who_made: WHO_MADE,
            when_made: WHEN_MADE,
            taxonomy_id: product.taxonomy_id.unwrap_or(DEFAULT_TAXONOMY_ID),
            tags: product.tags.clone(),
            materials: product.materials.clone(),
        }
    }

    fn shop_url(&self) -> String {
        format!(
            "{}/shops/{}",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(self.config.shop_id.as_deref().unwrap_or_default())
        )
    }

    fn listings_url(&self) -> String {
        format!("{}/listings", self.shop_url())
    }

    fn listing_url(&self, listing_id: &str) -> String {
        format!("{}/{}", self.listings_url(), urlencoding::encode(listing_id))
    }

    fn images_url(&self, listing_id: &str) -> String {
        format!("{}/images", self.listing_url(listing_id))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("x-api-key", self.config.api_key.as_deref().unwrap_or_default())
            .bearer_auth(self.config.access_token.as_deref().unwrap_or_default())
    }

    async fn send_listing(&self, request: RequestBuilder) -> Result<String, RequestError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| RequestError::from_transport(SERVICE, e))?;
        let response = RequestError::check(SERVICE, response).await?;
        let listing: EtsyListingResponse = response
            .json()
            .await
            .map_err(|e| RequestError::from_transport(SERVICE, e))?;

        Ok(listing.listing_id.to_string())
    }

    async fn post_image(&self, listing_id: &str, url: &str, rank: usize) -> Result<(), RequestError> {
        debug!("Attaching image {} to Etsy listing {} at rank {}", url, listing_id, rank);

        let payload = EtsyImagePayload {
            url: url.to_string(),
            rank,
        };
        let request = self.client.post(self.images_url(listing_id)).json(&payload);
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| RequestError::from_transport(SERVICE, e))?;
        RequestError::check(SERVICE, response).await?;

        Ok(())
    }

    fn not_configured(&self) -> ProductOperationResult {
        ProductOperationResult::failed(
            "Etsy channel is not configured",
            self.config
                .missing_vars()
                .into_iter()
                .map(|var| format!("{var} is not set"))
                .collect(),
        )
    }
}

#[async_trait]
impl SalesChannel for EtsyChannel {
    fn name(&self) -> &'static str {
        "etsy"
    }

    async fn create_listing(&self, product: &Product) -> ProductOperationResult {
        if !self.is_configured() {
            return self.not_configured();
        }

        info!("Creating Etsy listing: {}", product.title);

        let payload = Self::listing_payload(product);
        let request = self.client.post(self.listings_url()).json(&payload);

        match self.send_listing(request).await {
            Ok(listing_id) => {
                info!("Etsy listing {} created", listing_id);
                ProductOperationResult::succeeded(
                    Some(listing_id),
                    format!("Created Etsy listing for \"{}\"", product.title),
                )
            }
            Err(e) => {
                error!("Failed to create Etsy listing: {}", e);
                ProductOperationResult::failed("Failed to create Etsy listing", vec![e.to_string()])
            }
        }
    }

    async fn update_listing(
        &self,
        listing_id: &str,
        update: &ProductUpdate,
    ) -> ProductOperationResult {
        if !self.is_configured() {
            return self.not_configured();
        }

        info!("Updating Etsy listing {}", listing_id);

        let request = self.client.patch(self.listing_url(listing_id)).json(update);

        match self.send_listing(request).await {
            Ok(listing_id) => ProductOperationResult::succeeded(
                Some(listing_id.clone()),
                format!("Updated Etsy listing {listing_id}"),
            ),
            Err(e) => {
                error!("Failed to update Etsy listing {}: {}", listing_id, e);
                ProductOperationResult::failed("Failed to update Etsy listing", vec![e.to_string()])
            }
        }
    }

    async fn upload_images(&self, listing_id: &str, urls: &[String]) -> ProductOperationResult {
        if !self.is_configured() {
            return self.not_configured();
        }
        if urls.is_empty() {
            return ProductOperationResult::succeeded(
                Some(listing_id.to_string()),
                "No images to upload",
            );
        }

        info!("Uploading {} images to Etsy listing {}", urls.len(), listing_id);

        let uploads = urls
            .iter()
            .enumerate()
            .map(|(index, url)| self.post_image(listing_id, url, index + 1));

        let errors: Vec<String> = join_all(uploads)
            .await
            .into_iter()
            .filter_map(|outcome| outcome.err())
            .map(|e| e.to_string())
            .collect();

        if errors.is_empty() {
            ProductOperationResult::succeeded(
                Some(listing_id.to_string()),
                format!("Uploaded {} images", urls.len()),
            )
        } else {
            error!("Image upload to Etsy listing {} failed: {:?}", listing_id, errors);
            ProductOperationResult::failed("Failed to upload images to Etsy", errors)
        }
    }

    fn is_configured(&self) -> bool {
        self.config.is_complete()
    }
}

impl Clone for EtsyChannel {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
        }
    }
}
