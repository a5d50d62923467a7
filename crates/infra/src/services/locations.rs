use tracing::info;

use stockroom_core::{DomainError, Entity, EntityKind, LocationId};
use stockroom_locations::{Location, LocationChanges, NewLocation};

use crate::db::{Database, locations, movements};
use crate::error::ServiceResult;

/// Location create/list/edit/delete with the referential guard on delete.
#[derive(Debug, Clone)]
pub struct LocationDirectory {
    db: Database,
}

impl LocationDirectory {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewLocation) -> ServiceResult<Location> {
        let location = input.validate()?;

        let mut tx = self.db.begin().await?;
        if locations::find(&mut tx, &location.location_id).await?.is_some() {
            let err = DomainError::already_exists(EntityKind::Location, &location.location_id);
            return Err(err.into());
        }
        locations::insert(&mut tx, &location).await?;
        tx.commit().await?;

        info!(location_id = %location.location_id, "location created");
        Ok(location)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Location> {
        let id = LocationId::parse(id)?;
        let mut conn = self.db.acquire().await?;
        locations::find(&mut conn, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Location, id.as_str()).into())
    }

    /// Locations whose id, name or address contains `search`.
    pub async fn list(&self, search: &str) -> ServiceResult<Vec<Location>> {
        let mut conn = self.db.acquire().await?;
        let all = locations::list(&mut conn).await?;
        Ok(all.into_iter().filter(|l| l.matches(search)).collect())
    }

    /// Replace name and address; the id is fixed.
    pub async fn update(&self, id: &str, changes: LocationChanges) -> ServiceResult<Location> {
        let id = LocationId::parse(id)?;

        let mut tx = self.db.begin().await?;
        let existing = locations::find(&mut tx, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Location, id.as_str()))?;
        let updated = existing.with_changes(changes)?;
        locations::update(&mut tx, &updated).await?;
        tx.commit().await?;

        info!(location_id = %updated.location_id, "location updated");
        Ok(updated)
    }

    /// Delete a location nothing references; returns the removed record.
    pub async fn delete(&self, id: &str) -> ServiceResult<Location> {
        let id = LocationId::parse(id)?;

        let mut tx = self.db.begin().await?;
        let existing = locations::find(&mut tx, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Location, id.as_str()))?;

        let references = movements::count_for_location(&mut tx, &id).await?;
        if references > 0 {
            info!(location_id = %id, references, "location delete blocked");
            return Err(existing.in_use(references).into());
        }

        locations::delete(&mut tx, &id).await?;
        tx.commit().await?;

        info!(location_id = %id, "location deleted");
        Ok(existing)
    }
}
