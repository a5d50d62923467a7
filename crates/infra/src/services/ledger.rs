//! Movement ledger: append, edit and delete ledger entries.
//!
//! Shape rules (positive quantity, at least one location) live in the
//! domain; this service adds the checks that need the store: referenced
//! product and locations must exist, and ids must be unique.

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::info;

use stockroom_core::{DomainError, EntityKind, MovementId};
use stockroom_inventory::{Movement, MovementDraft, MovementInput, MovementView, NewMovement};

use crate::db::{Database, locations, movements, products};
use crate::error::ServiceResult;

#[derive(Debug, Clone)]
pub struct MovementLedger {
    db: Database,
}

impl MovementLedger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validate and store a new movement. The timestamp defaults to now.
    pub async fn record(&self, new: NewMovement) -> ServiceResult<Movement> {
        let (movement_id, draft) = new.validate()?;

        let mut tx = self.db.begin().await?;
        ensure_catalog_not_empty(&mut tx).await?;
        ensure_references(&mut tx, &draft).await?;
        if movements::find(&mut tx, &movement_id).await?.is_some() {
            return Err(DomainError::already_exists(EntityKind::Movement, &movement_id).into());
        }

        let movement = draft.into_movement(movement_id, Utc::now());
        movements::insert(&mut tx, &movement).await?;
        tx.commit().await?;

        info!(
            movement_id = %movement.movement_id,
            product_id = %movement.product_id,
            qty = movement.qty.get(),
            "movement recorded"
        );
        Ok(movement)
    }

    /// Replace product, locations and quantity of an existing movement.
    pub async fn update(&self, id: &str, input: MovementInput) -> ServiceResult<Movement> {
        let id = MovementId::parse(id)?;
        let draft = input.validate()?;

        let mut tx = self.db.begin().await?;
        let existing = movements::find(&mut tx, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Movement, id.as_str()))?;
        ensure_references(&mut tx, &draft).await?;

        let updated = draft.apply_to(&existing);
        movements::update(&mut tx, &updated).await?;
        tx.commit().await?;

        info!(movement_id = %updated.movement_id, "movement updated");
        Ok(updated)
    }

    pub async fn remove(&self, id: &str) -> ServiceResult<Movement> {
        let id = MovementId::parse(id)?;

        let mut tx = self.db.begin().await?;
        let existing = movements::find(&mut tx, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Movement, id.as_str()))?;
        movements::delete(&mut tx, &id).await?;
        tx.commit().await?;

        info!(movement_id = %id, "movement deleted");
        Ok(existing)
    }

    /// Clear the whole ledger; returns how many rows were removed.
    pub async fn remove_all(&self) -> ServiceResult<u64> {
        let mut tx = self.db.begin().await?;
        let deleted = movements::delete_all(&mut tx).await?;
        tx.commit().await?;

        info!(deleted, "all movements deleted");
        Ok(deleted)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<MovementView> {
        let id = MovementId::parse(id)?;
        let mut conn = self.db.acquire().await?;
        movements::find_view(&mut conn, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Movement, id.as_str()).into())
    }

    /// Movements matching `query`, newest first. A blank query returns all.
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<MovementView>> {
        let mut conn = self.db.acquire().await?;
        let all = movements::list_views(&mut conn).await?;
        Ok(all.into_iter().filter(|m| m.matches(query)).collect())
    }
}

async fn ensure_catalog_not_empty(conn: &mut SqliteConnection) -> ServiceResult<()> {
    if products::count(conn).await? == 0 {
        return Err(DomainError::validation("add some products before creating movements").into());
    }
    if locations::count(conn).await? == 0 {
        return Err(DomainError::validation("add some locations before creating movements").into());
    }
    Ok(())
}

/// Unknown references are input errors, not missing-resource errors: the
/// caller picked them.
async fn ensure_references(
    conn: &mut SqliteConnection,
    draft: &MovementDraft,
) -> ServiceResult<()> {
    if products::find(conn, &draft.product_id).await?.is_none() {
        return Err(DomainError::validation(format!(
            "product {} does not exist",
            draft.product_id
        ))
        .into());
    }
    for location in draft.locations() {
        if locations::find(conn, location).await?.is_none() {
            return Err(
                DomainError::validation(format!("location {location} does not exist")).into(),
            );
        }
    }
    Ok(())
}
