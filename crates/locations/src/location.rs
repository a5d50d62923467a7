use serde::{Deserialize, Serialize};

use stockroom_core::{DomainResult, Entity, EntityKind, LocationId, text};

/// Entity: Location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub location_id: LocationId,
    pub name: String,
    pub address: Option<String>,
}

impl Location {
    /// Case-sensitive substring match over id, name and address.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || text::contains(self.location_id.as_str(), query)
            || text::contains(&self.name, query)
            || self
                .address
                .as_deref()
                .is_some_and(|a| text::contains(a, query))
    }

    pub fn with_changes(&self, changes: LocationChanges) -> DomainResult<Location> {
        Ok(Location {
            location_id: self.location_id.clone(),
            name: text::required("name", &changes.name)?,
            address: text::optional(changes.address),
        })
    }
}

impl Entity for Location {
    type Id = LocationId;
    const KIND: EntityKind = EntityKind::Location;

    fn id(&self) -> &Self::Id {
        &self.location_id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Input for creating a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub location_id: String,
    pub name: String,
    pub address: Option<String>,
}

impl NewLocation {
    pub fn validate(self) -> DomainResult<Location> {
        Ok(Location {
            location_id: LocationId::parse(&self.location_id)?,
            name: text::required("name", &self.name)?,
            address: text::optional(self.address),
        })
    }
}

/// Editable fields of a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChanges {
    pub name: String,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse() -> Location {
        NewLocation {
            location_id: "L001".to_string(),
            name: "Main Warehouse".to_string(),
            address: Some("123 Industrial Blvd".to_string()),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn validate_requires_id_and_name() {
        let missing_id = NewLocation {
            location_id: " ".to_string(),
            name: "Store Front".to_string(),
            address: None,
        };
        assert!(missing_id.validate().unwrap_err().is_validation());

        let missing_name = NewLocation {
            location_id: "L002".to_string(),
            name: String::new(),
            address: None,
        };
        assert!(missing_name.validate().unwrap_err().is_validation());
    }

    #[test]
    fn matches_address() {
        let l = warehouse();
        assert!(l.matches("Industrial"));
        assert!(l.matches("L00"));
        assert!(!l.matches("industrial"));
    }

    #[test]
    fn changes_cannot_move_the_id() {
        let updated = warehouse()
            .with_changes(LocationChanges {
                name: "Warehouse North".to_string(),
                address: Some(" ".to_string()),
            })
            .unwrap();
        assert_eq!(updated.location_id.as_str(), "L001");
        assert_eq!(updated.address, None);
    }
}
