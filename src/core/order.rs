use crate::core::model::{Order, OrderRequest};
use crate::core::registry::{ServiceEndpoint, ServiceRegistry};
use crate::utils::error::Result;
use reqwest::Client;

pub const ORDER_SERVICE_NAME: &str = "order";
const ORDER_PATH: &str = "/v1/order";

/// Client for the order downstream. The endpoint is resolved once at
/// construction, unlike the catalog client which resolves per call.
#[derive(Debug, Clone)]
pub struct OrderClient {
    client: Client,
    endpoint: ServiceEndpoint,
}

impl OrderClient {
    pub fn new(client: Client, registry: &ServiceRegistry) -> Result<Self> {
        let endpoint = registry.resolve(ORDER_SERVICE_NAME)?.clone();
        Ok(Self { client, endpoint })
    }

    /// Places one order. Non-2xx statuses are not interpreted here; any
    /// transport or decode failure propagates as a generic downstream error.
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order> {
        let url = self.endpoint.url_for(ORDER_PATH);
        tracing::debug!("Creating order at {} for '{}'", url, request.reference);

        let response = self.client.post(url).json(request).send().await?;
        Ok(response.json::<Order>().await?)
    }
}
