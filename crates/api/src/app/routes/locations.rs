use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use stockroom_infra::Services;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/locations", get(list_locations))
        .route("/locations/add", post(add_location))
        .route("/locations/edit/:id", post(edit_location))
        .route("/locations/delete/:id", post(delete_location))
        .route("/locations/:id", get(get_location))
}

pub async fn list_locations(
    Extension(services): Extension<Arc<Services>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    match services.locations.list(params.query()).await {
        Ok(locations) => Json(serde_json::json!({
            "search": params.query(),
            "locations": locations.iter().map(dto::location_to_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_location(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.locations.get(&id).await {
        Ok(loc) => Json(dto::location_to_json(&loc)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_location(
    Extension(services): Extension<Arc<Services>>,
    payload: Result<Json<dto::LocationRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::body(payload) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match services.locations.create(body.into_new()).await {
        Ok(loc) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Location added successfully!",
                "location": dto::location_to_json(&loc),
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn edit_location(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::LocationRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::body(payload) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match services.locations.update(&id, body.into_changes()).await {
        Ok(loc) => Json(serde_json::json!({
            "message": "Location updated successfully!",
            "location": dto::location_to_json(&loc),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_location(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.locations.delete(&id).await {
        Ok(loc) => Json(serde_json::json!({
            "message": "Location deleted successfully!",
            "location": dto::location_to_json(&loc),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
