use super::AppState;
use crate::core::model::{Item, Order};
use crate::utils::error::{BrokerError, Result};
use async_stream::try_stream;
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::Stream;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ItemNotFoundResponse {
    pub message: String,
    pub id: u64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

/// GET /broker/items
///
/// The response body is produced element by element from the catalog stream,
/// never buffered whole. A disconnecting client drops the body stream, which
/// cancels the in-flight catalog request.
pub async fn get_items(State(state): State<AppState>) -> Response {
    match state.broker.list_items().await {
        Ok(items) => {
            let body = Body::from_stream(json_array_body(items));
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
        Err(e) => e.into_response(),
    }
}

/// POST /broker/buy/{id}
pub async fn buy_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> std::result::Result<Json<Order>, BrokerError> {
    let order = state.broker.buy(id).await?;
    Ok(Json(order))
}

fn json_array_body(
    items: impl Stream<Item = Result<Item>> + Send + 'static,
) -> impl Stream<Item = Result<Bytes>> + Send + 'static {
    try_stream! {
        yield Bytes::from_static(b"[");
        let mut first = true;
        for await item in items {
            let item = item?;
            let mut chunk = Vec::new();
            if !first {
                chunk.push(b',');
            }
            first = false;
            serde_json::to_writer(&mut chunk, &item)?;
            yield Bytes::from(chunk);
        }
        yield Bytes::from_static(b"]");
    }
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            BrokerError::ItemNotFound { id } => {
                (StatusCode::NOT_FOUND, Json(ItemNotFoundResponse { message, id })).into_response()
            }
            _ => {
                // Registry and transport details stay in the logs; the caller
                // only sees a generic failure.
                tracing::error!("Request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
