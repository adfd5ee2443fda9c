//! HTTP client for the inventory backend.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::api::{errors::ApiError, models::Product};

/// Configuration for connecting to the inventory backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend address including the API prefix, e.g. `"http://localhost:5000/api"`.
    pub base_url: String,
}

/// Typed access to the inventory backend.
///
/// Every endpoint answers with the `{ "success": bool, ...payload }`
/// envelope; `success: false` is reported as [`ApiError::Rejected`]
/// regardless of the HTTP status code.
#[automock]
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Fetch the full product set. The backend does not paginate.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch the known category names.
    async fn list_categories(&self) -> Result<Vec<String>, ApiError>;

    /// Record a sale of `quantity` units against a product.
    async fn record_sale(&self, product_id: i64, quantity: u32) -> Result<(), ApiError>;

    /// Record a stock purchase of `quantity` units against a product.
    async fn record_purchase(
        &self,
        product_id: i64,
        quantity: u32,
        notes: Option<String>,
    ) -> Result<(), ApiError>;

    /// Set a product's selling price.
    async fn update_price(&self, product_id: i64, selling_price: Decimal)
    -> Result<(), ApiError>;

    /// Delete a product.
    async fn delete_product(&self, product_id: i64) -> Result<(), ApiError>;
}

/// HTTP implementation of [`InventoryApi`].
#[derive(Debug, Clone)]
pub struct HttpInventoryApi {
    config: ApiConfig,
    http: Client,
}

impl HttpInventoryApi {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.http.get(self.url("/products")).send().await?;

        let parsed: ProductsResponse = envelope(response).await?;

        parsed.base.check()?;

        Ok(parsed.products)
    }

    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let response = self.http.get(self.url("/categories")).send().await?;

        let parsed: CategoriesResponse = envelope(response).await?;

        parsed.base.check()?;

        Ok(parsed.categories)
    }

    async fn record_sale(&self, product_id: i64, quantity: u32) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/products/{product_id}/sale")))
            .json(&SaleBody { quantity })
            .send()
            .await?;

        let parsed: Envelope = envelope(response).await?;

        parsed.check()
    }

    async fn record_purchase(
        &self,
        product_id: i64,
        quantity: u32,
        notes: Option<String>,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/products/{product_id}/purchase")))
            .json(&PurchaseBody { quantity, notes })
            .send()
            .await?;

        let parsed: Envelope = envelope(response).await?;

        parsed.check()
    }

    async fn update_price(
        &self,
        product_id: i64,
        selling_price: Decimal,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/products/{product_id}/update")))
            .json(&PriceBody { selling_price })
            .send()
            .await?;

        let parsed: Envelope = envelope(response).await?;

        parsed.check()
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/products/{product_id}")))
            .send()
            .await?;

        let parsed: Envelope = envelope(response).await?;

        parsed.check()
    }
}

/// Parse a response body as a JSON envelope, whatever the HTTP status.
///
/// The backend signals failure through `success: false` in the body rather
/// than the status code, so the status is only reported when the body is not
/// a JSON envelope at all.
async fn envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    serde_json::from_str(&text)
        .map_err(|err| ApiError::UnexpectedResponse(format!("status {status}: {err}")))
}

#[derive(Debug, Serialize)]
struct SaleBody {
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct PurchaseBody {
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct PriceBody {
    selling_price: Decimal,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

impl Envelope {
    fn check(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                self.error.unwrap_or_else(|| "request failed".to_owned()),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    #[serde(flatten)]
    base: Envelope,
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(flatten)]
    base: Envelope,
    #[serde(default)]
    categories: Vec<String>,
}
