use crate::error::CatalogError;
use async_trait::async_trait;
use pantry_model::Item;
use serde::Deserialize;

/// Default provider endpoint (Chomp branded food search).
pub const DEFAULT_ENDPOINT: &str = "https://chompthis.com/api/v2/food/branded/name.php";

/// Fixed number of results requested per search.
pub const SEARCH_PAGE_SIZE: usize = 10;

/// Catalog lookup by product name.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Run one catalog search. Every call is a fresh provider request;
    /// nothing is cached or retried here.
    async fn search(&self, query: &str) -> Result<Vec<Item>, CatalogError>;
}

/// HTTP client for the catalog provider.
pub struct ChompCatalog {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl ChompCatalog {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

/// Provider result entry. Only the fields the model keeps are read;
/// everything else in the payload is dropped on the floor.
#[derive(Debug, Deserialize)]
struct ProviderItem {
    #[serde(default)]
    barcode: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    brand: String,
}

#[derive(Debug, Deserialize)]
struct ProviderPayload {
    #[serde(default)]
    items: Vec<ProviderItem>,
}

#[async_trait]
impl CatalogSearch for ChompCatalog {
    async fn search(&self, query: &str) -> Result<Vec<Item>, CatalogError> {
        if query.trim().is_empty() {
            return Err(CatalogError::EmptyQuery);
        }

        let limit = SEARCH_PAGE_SIZE.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("name", query),
                ("limit", limit.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::from_status(status.as_u16()));
        }

        let payload: ProviderPayload = response.json().await.map_err(CatalogError::Transport)?;
        Ok(payload
            .items
            .into_iter()
            .map(|item| Item::new(item.barcode, item.name, item.brand))
            .collect())
    }
}
