use tracing::info;

use stockroom_core::{DomainError, Entity, EntityKind, ProductId};
use stockroom_products::{NewProduct, Product, ProductChanges};

use crate::db::{Database, movements, products};
use crate::error::ServiceResult;

/// Product create/list/edit/delete with the referential guard on delete.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    db: Database,
}

impl ProductCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewProduct) -> ServiceResult<Product> {
        let product = input.validate()?;

        let mut tx = self.db.begin().await?;
        if products::find(&mut tx, &product.product_id).await?.is_some() {
            let err = DomainError::already_exists(EntityKind::Product, &product.product_id);
            return Err(err.into());
        }
        products::insert(&mut tx, &product).await?;
        tx.commit().await?;

        info!(product_id = %product.product_id, "product created");
        Ok(product)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Product> {
        let id = ProductId::parse(id)?;
        let mut conn = self.db.acquire().await?;
        products::find(&mut conn, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Product, id.as_str()).into())
    }

    /// Products whose id, name or description contains `search`.
    pub async fn list(&self, search: &str) -> ServiceResult<Vec<Product>> {
        let mut conn = self.db.acquire().await?;
        let all = products::list(&mut conn).await?;
        Ok(all.into_iter().filter(|p| p.matches(search)).collect())
    }

    /// Replace name and description; the id is fixed.
    pub async fn update(&self, id: &str, changes: ProductChanges) -> ServiceResult<Product> {
        let id = ProductId::parse(id)?;

        let mut tx = self.db.begin().await?;
        let existing = products::find(&mut tx, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Product, id.as_str()))?;
        let updated = existing.with_changes(changes)?;
        products::update(&mut tx, &updated).await?;
        tx.commit().await?;

        info!(product_id = %updated.product_id, "product updated");
        Ok(updated)
    }

    /// Delete a product nothing references; returns the removed record.
    pub async fn delete(&self, id: &str) -> ServiceResult<Product> {
        let id = ProductId::parse(id)?;

        let mut tx = self.db.begin().await?;
        let existing = products::find(&mut tx, &id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Product, id.as_str()))?;

        let references = movements::count_for_product(&mut tx, &id).await?;
        if references > 0 {
            info!(product_id = %id, references, "product delete blocked");
            return Err(existing.in_use(references).into());
        }

        products::delete(&mut tx, &id).await?;
        tx.commit().await?;

        info!(product_id = %id, "product deleted");
        Ok(existing)
    }
}
