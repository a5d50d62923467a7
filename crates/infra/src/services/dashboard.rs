use serde::Serialize;

use crate::db::{Database, locations, movements, products};
use crate::error::ServiceResult;

/// Row counts shown on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub products: u64,
    pub locations: u64,
    pub movements: u64,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    db: Database,
}

impl Dashboard {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn counts(&self) -> ServiceResult<Counts> {
        let mut conn = self.db.acquire().await?;
        Ok(Counts {
            products: products::count(&mut conn).await?,
            locations: locations::count(&mut conn).await?,
            movements: movements::count(&mut conn).await?,
        })
    }
}
