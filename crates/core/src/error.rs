//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// The kind of record an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    Location,
    Movement,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Location => "location",
            EntityKind::Movement => "movement",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing records, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or incomplete input (missing field, non-positive quantity, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation referenced an id that does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },

    /// A uniqueness conflict (e.g. the id is already taken).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Deletion blocked because movements still reference the record.
    #[error(
        "cannot delete {entity} \"{name}\" because it has {references} movement(s) associated with it; delete the movements first"
    )]
    InUse {
        entity: EntityKind,
        name: String,
        references: u64,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn already_exists(entity: EntityKind, id: impl core::fmt::Display) -> Self {
        Self::Conflict(format!("{entity} {id} already exists"))
    }

    pub fn in_use(entity: EntityKind, name: impl Into<String>, references: u64) -> Self {
        Self::InUse {
            entity,
            name: name.into(),
            references,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::InUse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_use_message_names_entity_and_count() {
        let err = DomainError::in_use(EntityKind::Location, "Main Warehouse", 3);
        assert_eq!(
            err.to_string(),
            "cannot delete location \"Main Warehouse\" because it has 3 movement(s) associated with it; delete the movements first"
        );
        assert!(err.is_conflict());
    }

    #[test]
    fn not_found_message_includes_id() {
        let err = DomainError::not_found(EntityKind::Product, "P404");
        assert_eq!(err.to_string(), "product P404 not found");
    }
}
