pub mod handlers;

use crate::core::Broker;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<Broker>,
}

pub fn router(broker: Arc<Broker>) -> Router {
    Router::new()
        .route("/broker/items", get(handlers::get_items))
        .route("/broker/buy/{id}", post(handlers::buy_item))
        .with_state(AppState { broker })
}
