use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::LookupConfig;
use crate::models::{NutrientRecord, Product};
use crate::serving::scale_product;

/// Fields requested from the product database; everything else is dropped server-side.
const PRODUCT_FIELDS: &str = concat!(
    "product_name,image_front_url,nutriments,nutriscore_grade,",
    "serving_size,ingredients_text,allergens_from_ingredients",
);

/// Barcode to per-100g product facts.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// `Ok(None)` means the barcode is unknown.
    async fn lookup(&self, barcode: &str) -> Result<Option<Product>>;
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[allow(dead_code)]
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    status: i64,
    #[serde(default)]
    product: Option<Product>,
    #[serde(default)]
    status_verbose: Option<String>,
}

/// Client for the Open Food Facts product API.
#[derive(Clone)]
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new() -> Result<Self> {
        Self::with_config(&LookupConfig::default())
    }

    pub fn from_env() -> Result<Self> {
        Self::with_config(&LookupConfig::from_env())
    }

    pub fn with_config(config: &LookupConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, barcode: &str) -> String {
        format!("{}/api/v2/product/{}.json", self.base_url, barcode)
    }

    /// Fetch a product by barcode.
    ///
    /// Returns `Ok(None)` when the database reports the barcode as unknown.
    pub async fn get_product(&self, barcode: &str) -> Result<Option<Product>> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(anyhow!("Barcode cannot be empty"));
        }
        if !barcode.chars().all(|c| c.is_ascii_digit()) {
            return Err(anyhow!("Barcode must contain only digits: {}", barcode));
        }

        let url = self.product_url(barcode);
        debug!(%url, "looking up product");

        let resp = self
            .client
            .get(&url)
            .query(&[("fields", PRODUCT_FIELDS)])
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            info!(barcode, "product not found");
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Product lookup failed: {} - {}", status, body));
        }

        let data: ProductResponse = resp.json().await?;
        Ok(product_from_response(barcode, data))
    }

    /// Look up a product and scale its facts to `servings` of its stated serving size.
    ///
    /// `Ok(None)` covers both an unknown barcode and a product without nutrient facts.
    pub async fn lookup_record(
        &self,
        barcode: &str,
        servings: f64,
    ) -> Result<Option<NutrientRecord>> {
        let Some(product) = self.get_product(barcode).await? else {
            return Ok(None);
        };
        Ok(scale_product(&product, servings)?)
    }
}

#[async_trait]
impl ProductLookup for OpenFoodFactsClient {
    async fn lookup(&self, barcode: &str) -> Result<Option<Product>> {
        self.get_product(barcode).await
    }
}

fn product_from_response(barcode: &str, data: ProductResponse) -> Option<Product> {
    if data.status == 0 {
        info!(
            barcode,
            reason = data.status_verbose.as_deref().unwrap_or("product not found"),
            "product not found"
        );
        return None;
    }
    data.product
}
