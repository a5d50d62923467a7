use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use stockroom_infra::Services;

use crate::app::errors;

pub async fn health(Extension(services): Extension<Arc<Services>>) -> axum::response::Response {
    match services.db.health_check().await {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Landing page: how many records of each kind exist.
pub async fn index(Extension(services): Extension<Arc<Services>>) -> axum::response::Response {
    match services.dashboard.counts().await {
        Ok(counts) => Json(counts).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
