use axum::{Router, routing::get};

pub mod balance;
pub mod locations;
pub mod movements;
pub mod products;
pub mod system;

/// Router for the inventory endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/balance", get(balance::report))
        .merge(products::router())
        .merge(locations::router())
        .merge(movements::router())
}
