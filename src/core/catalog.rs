use crate::core::json_stream::JsonArrayDecoder;
use crate::core::model::Item;
use crate::core::registry::ServiceRegistry;
use crate::utils::error::{BrokerError, Result};
use async_stream::try_stream;
use futures::Stream;
use reqwest::Client;
use std::sync::Arc;

const CATALOG_SERVICE_NAME: &str = "catalog";
const ITEMS_PATH: &str = "/v2/pets";

/// Client for the catalog downstream. Holds no per-request state; one
/// instance serves all concurrent requests.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    registry: Arc<ServiceRegistry>,
}

impl CatalogClient {
    pub fn new(client: Client, registry: Arc<ServiceRegistry>) -> Self {
        Self { client, registry }
    }

    /// Streams the full catalog. Items are decoded as response chunks arrive,
    /// so consuming only the head of the stream does not require the whole
    /// downstream body. Dropping the stream cancels the in-flight request.
    //
    // Status codes and headers are deliberately not checked here; the
    // downstream response is assumed to be a well-formed JSON array.
    pub async fn list_items(&self) -> Result<impl Stream<Item = Result<Item>> + Send + 'static> {
        let service = self.registry.resolve(CATALOG_SERVICE_NAME)?;
        let url = service.url_for(ITEMS_PATH);
        tracing::debug!("Listing items from {}", url);

        let response = self.client.get(url).send().await?;
        let body = response.bytes_stream();

        Ok(try_stream! {
            let mut decoder = JsonArrayDecoder::new();
            for await chunk in body {
                decoder.push(&chunk?);
                while let Some(value) = decoder.next_value()? {
                    yield serde_json::from_slice::<Item>(&value)?;
                }
            }
            decoder.finish()?;
        })
    }

    /// Fetches one item. Any non-2xx downstream status means the catalog does
    /// not have the item, which is the sole source of the broker's 404.
    pub async fn get_item(&self, id: u64) -> Result<Item> {
        let service = self.registry.resolve(CATALOG_SERVICE_NAME)?;
        let url = service.url_for(&format!("{}/{}", ITEMS_PATH, id));
        tracing::debug!("Fetching item {} from {}", id, url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            tracing::debug!("Catalog returned {} for item {}", response.status(), id);
            return Err(BrokerError::ItemNotFound { id });
        }
        Ok(response.json::<Item>().await?)
    }
}
