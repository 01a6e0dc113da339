//! Printful store products

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::PrintfulConfig;
use crate::error::RequestError;
use crate::models::{
    PrintfulEnvelope, PrintfulProductInfo, PrintfulSyncProduct, PrintfulSyncVariant,
    ProviderProduct, ProviderVariant,
};
use crate::traits::PrintProvider;

const SERVICE: &str = "Printful";

/// Reads synced products from a Printful store
pub struct PrintfulProvider {
    client: Client,
    config: PrintfulConfig,
}

impl PrintfulProvider {
    pub fn new(config: &PrintfulConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.config.api_key.as_deref().unwrap_or_default())
            .send()
            .await
            .map_err(|e| RequestError::from_transport(SERVICE, e))?;
        let response = RequestError::check(SERVICE, response).await?;
        let envelope: PrintfulEnvelope<T> = response
            .json()
            .await
            .map_err(|e| RequestError::from_transport(SERVICE, e))?;

        Ok(envelope.result)
    }

    /// Fetches the store's products, surfacing failures.
    pub async fn fetch_products(&self) -> Result<Vec<ProviderProduct>, RequestError> {
        let products: Vec<PrintfulSyncProduct> = self.get("/store/products").await?;
        Ok(products.into_iter().map(|p| map_product(p, Vec::new())).collect())
    }

    /// Fetches one product with its variants, surfacing failures.
    pub async fn fetch_product_info(&self, product_id: u64) -> Result<ProviderProduct, RequestError> {
        let info: PrintfulProductInfo = self.get(&format!("/store/products/{product_id}")).await?;
        let variants = info.sync_variants.into_iter().map(map_variant).collect();
        Ok(map_product(info.sync_product, variants))
    }
}

fn map_variant(variant: PrintfulSyncVariant) -> ProviderVariant {
    ProviderVariant {
        id: variant.id,
        name: variant.name,
        retail_price: variant.retail_price.as_deref().and_then(parse_price),
        sku: variant.sku,
    }
}

fn map_product(product: PrintfulSyncProduct, variants: Vec<ProviderVariant>) -> ProviderProduct {
    ProviderProduct {
        id: product.id,
        name: product.name,
        price: variants.first().and_then(|v| v.retail_price),
        thumbnail_url: product.thumbnail_url,
        variants,
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

#[async_trait]
impl PrintProvider for PrintfulProvider {
    fn name(&self) -> &'static str {
        "printful"
    }

    async fn get_products(&self) -> Vec<ProviderProduct> {
        match self.fetch_products().await {
            Ok(products) => {
                info!("Fetched {} Printful products", products.len());
                products
            }
            Err(e) => {
                warn!("Printful product list unavailable: {}", e);
                Vec::new()
            }
        }
    }

    async fn get_product_info(&self, product_id: u64) -> Option<ProviderProduct> {
        match self.fetch_product_info(product_id).await {
            Ok(product) => Some(product),
            Err(e) => {
                warn!("Printful product {} unavailable: {}", product_id, e);
                None
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

impl Clone for PrintfulProvider {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
        }
    }
}
