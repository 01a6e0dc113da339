//! Local JSON export channel
//!
//! Each product is written to `<output_dir>/<id>.json` and summarised in
//! `<output_dir>/products.json`. The catalogue is read, modified and written
//! back without any locking, so two processes writing to the same directory
//! can lose each other's entries.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::channels::{slugify, to_base36};
use crate::config::WebsiteConfig;
use crate::models::{
    CatalogueEntry, Product, ProductImage, ProductOperationResult, ProductUpdate, StoredProduct,
};
use crate::traits::SalesChannel;

pub const CATALOGUE_FILE: &str = "products.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Product {0} not found")]
    NotFound(String),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            source,
        }
    }

    fn encode(path: &Path, source: serde_json::Error) -> Self {
        Self::Encode {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Writes products as JSON files for a static storefront
#[derive(Debug, Clone)]
pub struct WebsiteChannel {
    output_dir: PathBuf,
}

impl WebsiteChannel {
    pub fn new(config: &WebsiteConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Slug of the title plus a base-36 millisecond timestamp.
    pub fn generate_id(title: &str) -> String {
        let slug = slugify(title);
        let slug = if slug.is_empty() { "product".to_string() } else { slug };
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        format!("{slug}-{}", to_base36(millis))
    }

    pub fn product_path(&self, id: &str) -> PathBuf {
        self.output_dir.join(format!("{id}.json"))
    }

    pub fn catalogue_path(&self) -> PathBuf {
        self.output_dir.join(CATALOGUE_FILE)
    }

    /// Reads a stored product back from disk.
    pub async fn load_product(&self, id: &str) -> Result<StoredProduct, StoreError> {
        if !is_valid_id(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let path = self.product_path(id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        serde_json::from_str(&content).map_err(|e| StoreError::parse(&path, e))
    }

    /// Reads the catalogue index; a missing file is an empty catalogue.
    pub async fn catalogue(&self) -> Result<Vec<CatalogueEntry>, StoreError> {
        let path = self.catalogue_path();
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| StoreError::parse(&path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    /// Writes the product file and its catalogue entry.
    ///
    /// The catalogue is loaded before anything is written, so an unreadable
    /// catalogue leaves the directory untouched.
    async fn save_product(&self, product: &StoredProduct) -> Result<(), StoreError> {
        let mut entries = self.catalogue().await?;
        upsert_entry(&mut entries, product.catalogue_entry());

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| StoreError::io(&self.output_dir, e))?;

        let path = self.product_path(&product.id);
        write_json(&path, product).await?;
        debug!("Wrote {}", path.display());

        write_json(&self.catalogue_path(), &entries).await
    }

    fn store_failure(action: &str, err: &StoreError) -> ProductOperationResult {
        match err {
            StoreError::NotFound(id) => {
                ProductOperationResult::failed(format!("Product {id} not found"), Vec::new())
            }
            other => {
                error!("Failed to {}: {}", action, other);
                ProductOperationResult::failed(format!("Failed to {action}"), vec![other.to_string()])
            }
        }
    }
}

#[async_trait]
impl SalesChannel for WebsiteChannel {
    fn name(&self) -> &'static str {
        "website"
    }

    async fn create_listing(&self, product: &Product) -> ProductOperationResult {
        let now = Utc::now();
        let stored = StoredProduct {
            id: Self::generate_id(&product.title),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: product.quantity,
            tags: product.tags.clone(),
            materials: product.materials.clone(),
            taxonomy_id: product.taxonomy_id,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        match self.save_product(&stored).await {
            Ok(()) => {
                info!("Saved product {} to {}", stored.id, self.output_dir.display());
                ProductOperationResult::succeeded(
                    Some(stored.id.clone()),
                    format!("Saved \"{}\" to {}", stored.title, self.product_path(&stored.id).display()),
                )
            }
            Err(e) => Self::store_failure("save product", &e),
        }
    }

    async fn update_listing(
        &self,
        listing_id: &str,
        update: &ProductUpdate,
    ) -> ProductOperationResult {
        let mut stored = match self.load_product(listing_id).await {
            Ok(stored) => stored,
            Err(e) => return Self::store_failure("load product", &e),
        };

        stored.apply(update);
        stored.updated_at = Utc::now();

        match self.save_product(&stored).await {
            Ok(()) => {
                info!("Updated product {}", stored.id);
                ProductOperationResult::succeeded(
                    Some(stored.id.clone()),
                    format!("Updated product {}", stored.id),
                )
            }
            Err(e) => Self::store_failure("update product", &e),
        }
    }

    async fn upload_images(&self, listing_id: &str, urls: &[String]) -> ProductOperationResult {
        let mut stored = match self.load_product(listing_id).await {
            Ok(stored) => stored,
            Err(e) => return Self::store_failure("load product", &e),
        };

        let start = stored.images.len();
        stored
            .images
            .extend(urls.iter().enumerate().map(|(offset, url)| ProductImage {
                url: url.clone(),
                rank: start + offset + 1,
            }));
        stored.updated_at = Utc::now();

        let path = self.product_path(&stored.id);
        match write_json(&path, &stored).await {
            Ok(()) => ProductOperationResult::succeeded(
                Some(stored.id.clone()),
                format!("Added {} images to {}", urls.len(), stored.id),
            ),
            Err(e) => Self::store_failure("save images", &e),
        }
    }

    fn is_configured(&self) -> bool {
        true
    }
}

fn upsert_entry(entries: &mut Vec<CatalogueEntry>, entry: CatalogueEntry) {
    match entries.iter_mut().find(|existing| existing.id == entry.id) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

/// Ids are generated slugs; anything else could escape the output directory.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

async fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| StoreError::encode(path, e))?;
    tokio::fs::write(path, content)
        .await
        .map_err(|e| StoreError::io(path, e))
}
