use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::processor::ReceiptFilter;

pub const SERVICE_NAME: &str = "receipt-filter";

/// Stream webhook. Always answers 200 with the filter result, including
/// `null` and `{ "error": .. }`, so delivery is acknowledged.
pub async fn stream_webhook(
    State(filter): State<Arc<ReceiptFilter>>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    Json(filter.handle(&payload))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}
