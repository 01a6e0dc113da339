use clap::{Args, Parser, Subcommand};

use crate::models::{ProductInput, ProductUpdate};

#[derive(Parser, Debug)]
#[command(name = "product-publisher", version)]
#[command(about = "Validate products and publish them to sales channels", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check product data against the listing rules
    ValidateProduct(ProductArgs),

    /// Validate a product and publish it to a channel
    AddProduct {
        #[command(flatten)]
        product: ProductArgs,

        /// Channel to publish to (etsy, website)
        #[arg(short, long, default_value = "website")]
        channel: String,

        /// Validate and report configuration without publishing
        #[arg(long)]
        dry_run: bool,
    },

    /// Change fields of an existing listing
    UpdateProduct(UpdateArgs),

    /// List products from the print provider
    ProviderProducts {
        /// Show a single product with its variants
        #[arg(long)]
        id: Option<u64>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProductArgs {
    /// Product title (max 140 characters)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Product description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Price, greater than 0
    #[arg(short, long, allow_negative_numbers = true)]
    pub price: Option<f64>,

    /// Quantity in stock
    #[arg(short, long, allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    /// Comma-separated tags (max 13, 20 characters each)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Comma-separated materials
    #[arg(long, value_delimiter = ',')]
    pub materials: Vec<String>,

    /// Comma-separated image URLs
    #[arg(long, value_delimiter = ',')]
    pub images: Vec<String>,

    /// Marketplace taxonomy id
    #[arg(long)]
    pub taxonomy_id: Option<u64>,
}

impl ProductArgs {
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            price: self.price,
            quantity: self.quantity,
            tags: clean_list(&self.tags),
            materials: clean_list(&self.materials),
            images: clean_list(&self.images),
            taxonomy_id: self.taxonomy_id,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Listing id returned when the product was added
    pub listing_id: String,

    /// Channel holding the listing (etsy, website)
    #[arg(short, long, default_value = "website")]
    pub channel: String,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub price: Option<f64>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    /// Replaces all tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Replaces all materials
    #[arg(long, value_delimiter = ',')]
    pub materials: Option<Vec<String>>,

    /// Validate and report configuration without publishing
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateArgs {
    pub fn to_update(&self) -> ProductUpdate {
        ProductUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
            tags: self.tags.as_deref().map(clean_list),
            materials: self.materials.as_deref().map(clean_list),
        }
    }
}

/// Trims entries and drops the blank ones left by stray commas.
fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
