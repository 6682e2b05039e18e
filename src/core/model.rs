use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A sellable item as the catalog service reports it. Fields beyond `id` and
/// `name` are catalog-defined; they pass through the broker untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Body of a single order-service call, built per buy and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub reference: String,
}

/// An accepted order, returned verbatim from the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub reference: String,
    pub status: String,
}
