use crate::core::catalog::CatalogClient;
use crate::core::model::{Item, Order, OrderRequest};
use crate::core::order::OrderClient;
use crate::utils::error::Result;
use futures::Stream;

/// Composes the two downstream clients into the broker operations. Stateless
/// between requests; concurrent buys share the clients without coordination.
#[derive(Debug, Clone)]
pub struct Broker {
    catalog: CatalogClient,
    order: OrderClient,
}

impl Broker {
    pub fn new(catalog: CatalogClient, order: OrderClient) -> Self {
        Self { catalog, order }
    }

    /// Passthrough to the catalog item stream.
    pub async fn list_items(&self) -> Result<impl Stream<Item = Result<Item>> + Send + 'static> {
        self.catalog.list_items().await
    }

    /// Fetches the item, then places an order referencing it. The order call
    /// is only issued after the item fetch has succeeded; an absent item
    /// short-circuits with the not-found failure.
    pub async fn buy(&self, id: u64) -> Result<Order> {
        let item = self.catalog.get_item(id).await?;
        let request = OrderRequest {
            reference: to_reference(&item),
        };
        tracing::info!("Buying item {} with reference '{}'", id, request.reference);
        self.order.create_order(&request).await
    }
}

/// Order systems downstream depend on this literal shape; do not change it.
fn to_reference(item: &Item) -> String {
    format!("id-{},name-{}", item.id, item.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn reference_has_the_exact_wire_shape() {
        let item = Item {
            id: 1,
            name: "Rex".to_string(),
            extra: HashMap::new(),
        };
        assert_eq!(to_reference(&item), "id-1,name-Rex");
    }

    #[test]
    fn reference_keeps_name_verbatim() {
        let item = Item {
            id: 42,
            name: "Mr. Whiskers, Esq.".to_string(),
            extra: HashMap::new(),
        };
        assert_eq!(to_reference(&item), "id-42,name-Mr. Whiskers, Esq.");
    }
}
