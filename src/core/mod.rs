pub mod broker;
pub mod catalog;
pub mod json_stream;
pub mod model;
pub mod order;
pub mod registry;

pub use broker::Broker;
pub use catalog::CatalogClient;
pub use model::{Item, Order, OrderRequest};
pub use order::OrderClient;
pub use registry::{ServiceEndpoint, ServiceRegistry};
