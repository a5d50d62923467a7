use tracing::debug;

use stockroom_inventory::Balance;

use crate::db::{Database, balances};
use crate::error::ServiceResult;

/// Derives on-hand balances from the ledger on every call. Nothing is cached.
#[derive(Debug, Clone)]
pub struct BalanceEngine {
    db: Database,
}

impl BalanceEngine {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Positive balances for every product × location pair, in catalog order.
    pub async fn compute(&self) -> ServiceResult<Vec<Balance>> {
        let mut conn = self.db.acquire().await?;
        let rows = balances::positive(&mut conn).await?;
        debug!(rows = rows.len(), "balances computed");
        Ok(rows)
    }
}
