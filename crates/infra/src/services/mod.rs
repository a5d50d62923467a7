//! Application services: one transaction per operation.

pub mod balance;
pub mod dashboard;
pub mod ledger;
pub mod locations;
pub mod products;

pub use balance::BalanceEngine;
pub use dashboard::{Counts, Dashboard};
pub use ledger::MovementLedger;
pub use locations::LocationDirectory;
pub use products::ProductCatalog;

use crate::db::Database;

/// Every service, sharing one pool.
#[derive(Debug, Clone)]
pub struct Services {
    pub db: Database,
    pub products: ProductCatalog,
    pub locations: LocationDirectory,
    pub movements: MovementLedger,
    pub balances: BalanceEngine,
    pub dashboard: Dashboard,
}

impl Services {
    pub fn new(db: Database) -> Self {
        Self {
            products: ProductCatalog::new(db.clone()),
            locations: LocationDirectory::new(db.clone()),
            movements: MovementLedger::new(db.clone()),
            balances: BalanceEngine::new(db.clone()),
            dashboard: Dashboard::new(db.clone()),
            db,
        }
    }
}
