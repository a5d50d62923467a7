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
        .route("/products", get(list_products))
        .route("/products/add", post(add_product))
        .route("/products/edit/:id", post(edit_product))
        .route("/products/delete/:id", post(delete_product))
        .route("/products/:id", get(get_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<Services>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    match services.products.list(params.query()).await {
        Ok(products) => Json(serde_json::json!({
            "search": params.query(),
            "products": products.iter().map(dto::product_to_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.products.get(&id).await {
        Ok(p) => Json(dto::product_to_json(&p)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_product(
    Extension(services): Extension<Arc<Services>>,
    payload: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::body(payload) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match services.products.create(body.into_new()).await {
        Ok(p) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Product added successfully!",
                "product": dto::product_to_json(&p),
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn edit_product(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::body(payload) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match services.products.update(&id, body.into_changes()).await {
        Ok(p) => Json(serde_json::json!({
            "message": "Product updated successfully!",
            "product": dto::product_to_json(&p),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<Services>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.products.delete(&id).await {
        Ok(p) => Json(serde_json::json!({
            "message": "Product deleted successfully!",
            "product": dto::product_to_json(&p),
        }))
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
