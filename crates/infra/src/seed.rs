//! Demo dataset: four products, four locations and twenty movements.
//!
//! Loading replaces whatever is in the store, inside one transaction.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use stockroom_inventory::{MovementInput, NewMovement};
use stockroom_locations::NewLocation;
use stockroom_products::NewProduct;

use crate::db::{Database, locations, movements, products};
use crate::error::ServiceResult;

const PRODUCTS: &[(&str, &str, &str)] = &[
    ("P001", "Laptop Computer", "High-performance laptop for business use"),
    ("P002", "Wireless Mouse", "Ergonomic wireless mouse with USB receiver"),
    ("P003", "Mechanical Keyboard", "RGB mechanical keyboard with blue switches"),
    ("P004", "Monitor 24\"", "24-inch LED monitor with Full HD resolution"),
];

const LOCATIONS: &[(&str, &str, &str)] = &[
    ("L001", "Main Warehouse", "123 Industrial Blvd, City, State 12345"),
    ("L002", "Store Front", "456 Main Street, City, State 12345"),
    ("L003", "Storage Room A", "789 Storage Lane, City, State 12345"),
    ("L004", "Online Orders", "Virtual location for online sales"),
];

/// (movement, product, from, to, qty)
const MOVEMENTS: &[(&str, &str, Option<&str>, Option<&str>, i64)] = &[
    // initial stock into the warehouse
    ("M001", "P001", None, Some("L001"), 50),
    ("M002", "P002", None, Some("L001"), 100),
    ("M003", "P003", None, Some("L001"), 75),
    ("M004", "P004", None, Some("L001"), 30),
    // stock the store front
    ("M005", "P001", Some("L001"), Some("L002"), 10),
    ("M006", "P002", Some("L001"), Some("L002"), 25),
    ("M007", "P003", Some("L001"), Some("L002"), 15),
    ("M008", "P004", Some("L001"), Some("L002"), 8),
    // overflow storage
    ("M009", "P001", Some("L001"), Some("L003"), 5),
    ("M010", "P002", Some("L001"), Some("L003"), 20),
    // online sales
    ("M011", "P001", Some("L002"), Some("L004"), 3),
    ("M012", "P002", Some("L002"), Some("L004"), 8),
    ("M013", "P003", Some("L002"), Some("L004"), 5),
    ("M014", "P004", Some("L002"), Some("L004"), 2),
    // restock
    ("M015", "P001", None, Some("L001"), 20),
    ("M016", "P002", None, Some("L001"), 50),
    // storage room back to the store
    ("M017", "P001", Some("L003"), Some("L002"), 2),
    ("M018", "P002", Some("L003"), Some("L002"), 10),
    // more online sales
    ("M019", "P001", Some("L002"), Some("L004"), 4),
    ("M020", "P003", Some("L002"), Some("L004"), 3),
];

/// How many rows a dataset load inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub products: usize,
    pub locations: usize,
    pub movements: usize,
}

/// Wipe the store and load the demo dataset. Movement `i` is stamped
/// `now - 30 days + 2h * i`.
pub async fn load_sample_data(db: &Database, now: DateTime<Utc>) -> ServiceResult<SeedSummary> {
    let base = now - Duration::days(30);

    let mut tx = db.begin().await?;
    movements::delete_all(&mut tx).await?;
    products::delete_all(&mut tx).await?;
    locations::delete_all(&mut tx).await?;

    for (id, name, description) in PRODUCTS {
        let product = NewProduct {
            product_id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
        }
        .validate()?;
        products::insert(&mut tx, &product).await?;
    }

    for (id, name, address) in LOCATIONS {
        let location = NewLocation {
            location_id: id.to_string(),
            name: name.to_string(),
            address: Some(address.to_string()),
        }
        .validate()?;
        locations::insert(&mut tx, &location).await?;
    }

    for (i, (id, product, from, to, qty)) in MOVEMENTS.iter().enumerate() {
        let timestamp = base + Duration::hours(2 * i as i64);
        let (movement_id, draft) = NewMovement {
            movement_id: id.to_string(),
            input: MovementInput {
                product_id: product.to_string(),
                from_location: from.map(str::to_string),
                to_location: to.map(str::to_string),
                qty: *qty,
                timestamp: Some(timestamp),
            },
        }
        .validate()?;
        movements::insert(&mut tx, &draft.into_movement(movement_id, timestamp)).await?;
    }

    tx.commit().await?;

    let summary = SeedSummary {
        products: PRODUCTS.len(),
        locations: LOCATIONS.len(),
        movements: MOVEMENTS.len(),
    };
    info!(
        products = summary.products,
        locations = summary.locations,
        movements = summary.movements,
        "sample data loaded"
    );
    Ok(summary)
}
