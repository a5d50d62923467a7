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
        .route("/movements", get(list_movements))
        .route("/movements/add", post(add_movement))
        .route("/movements/edit/:id", post(edit_movement))
        .route("/movements/delete/:id", post(delete_movement))
        .route("/movements/delete-all", post(delete_all_movements))
        .route("/movements/:id", get(get_movement))
}

/// Newest first, each row carrying product and location names.
pub async fn list_movements(
    Extension(services): Extension<Arc<Services>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    match services.movements.search(params.query()).await {
        Ok(views) => Json(serde_json::json!({
            "search": params.query(),
            "movements": views.iter().map(dto::movement_view_to_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_movement(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.movements.get(&id).await {
        Ok(view) => Json(dto::movement_view_to_json(&view)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_movement(
    Extension(services): Extension<Arc<Services>>,
    payload: Result<Json<dto::MovementRequest>, JsonRejection>,
) -> axum::response::Response {
    let new = match dto::body(payload)
        .and_then(|b| b.into_new().map_err(errors::domain_error_to_response))
    {
        Ok(n) => n,
        Err(resp) => return resp,
    };

    match services.movements.record(new).await {
        Ok(m) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Movement added successfully!",
                "movement": dto::movement_to_json(&m),
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn edit_movement(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::MovementRequest>, JsonRejection>,
) -> axum::response::Response {
    let input = match dto::body(payload)
        .and_then(|b| b.into_update().map_err(errors::domain_error_to_response))
    {
        Ok(i) => i,
        Err(resp) => return resp,
    };

    match services.movements.update(&id, input).await {
        Ok(m) => Json(serde_json::json!({
            "message": "Movement updated successfully!",
            "movement": dto::movement_to_json(&m),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_movement(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.movements.remove(&id).await {
        Ok(m) => Json(serde_json::json!({
            "message": "Movement deleted successfully!",
            "movement": dto::movement_to_json(&m),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_all_movements(
    Extension(services): Extension<Arc<Services>>,
) -> axum::response::Response {
    match services.movements.remove_all().await {
        Ok(deleted) => Json(serde_json::json!({
            "message": format!(
                "Successfully deleted {deleted} movements. You can now delete products and locations."
            ),
            "deleted": deleted,
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
