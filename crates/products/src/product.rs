use serde::{Deserialize, Serialize};

use stockroom_core::{DomainResult, Entity, EntityKind, ProductId, text};

/// Entity: Product.
///
/// The id is chosen by the operator at creation time and never changes
/// afterwards; only `name` and `description` are editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub description: Option<String>,
}

impl Product {
    /// Whether the id, name or description contains `query` (case-sensitive).
    ///
    /// A blank query matches every product.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        text::contains(self.product_id.as_str(), query)
            || text::contains(&self.name, query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| text::contains(d, query))
    }

    /// Apply validated changes, keeping the id.
    pub fn with_changes(&self, changes: ProductChanges) -> DomainResult<Product> {
        let ProductChanges { name, description } = changes;
        Ok(Product {
            product_id: self.product_id.clone(),
            name: text::required("name", &name)?,
            description: text::optional(description),
        })
    }
}

impl Entity for Product {
    type Id = ProductId;
    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub product_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl NewProduct {
    /// Check required fields and build the entity.
    pub fn validate(self) -> DomainResult<Product> {
        Ok(Product {
            product_id: ProductId::parse(&self.product_id)?,
            name: text::required("name", &self.name)?,
            description: text::optional(self.description),
        })
    }
}

/// Editable fields of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: String,
    pub description: Option<String>,
}
