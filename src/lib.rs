pub mod config;
pub mod core;
pub mod utils;
pub mod web;

pub use config::BrokerConfig;
pub use core::{
    Broker, CatalogClient, Item, Order, OrderClient, OrderRequest, ServiceEndpoint, ServiceRegistry,
};
pub use utils::error::{BrokerError, Result};
