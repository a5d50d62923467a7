//! Records with a stable, user-chosen identity.

use crate::error::{DomainError, EntityKind};

pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    const KIND: EntityKind;

    fn id(&self) -> &Self::Id;

    /// Human-readable label used in messages (e.g. the product name).
    fn label(&self) -> &str;

    /// Refusal to delete this record while `references` movements point at it.
    fn in_use(&self, references: u64) -> DomainError {
        DomainError::in_use(Self::KIND, self.label(), references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shelf(String);

    impl Entity for Shelf {
        type Id = String;
        const KIND: EntityKind = EntityKind::Location;

        fn id(&self) -> &String {
            &self.0
        }

        fn label(&self) -> &str {
            "Top shelf"
        }
    }

    #[test]
    fn in_use_names_the_record() {
        let err = Shelf("S1".into()).in_use(3);
        assert_eq!(
            err,
            DomainError::InUse {
                entity: EntityKind::Location,
                name: "Top shelf".into(),
                references: 3,
            }
        );
    }
}
