use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use stockroom_infra::Services;

use crate::app::{dto, errors};

/// Every (product, location) pair currently holding stock.
pub async fn report(Extension(services): Extension<Arc<Services>>) -> axum::response::Response {
    match services.balances.compute().await {
        Ok(rows) => Json(serde_json::json!({
            "balances": rows.iter().map(dto::balance_to_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
