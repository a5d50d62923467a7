use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{
    DomainError, DomainResult, Entity, EntityKind, LocationId, MovementId, ProductId, Quantity,
    text,
};

/// Entity: Movement.
///
/// A ledger entry moving `qty` units of a product out of `from_location`
/// and into `to_location`. Either side may be absent: a movement with only
/// a destination is a receipt, one with only a source is an issue. At least
/// one side is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub movement_id: MovementId,
    pub product_id: ProductId,
    pub from_location: Option<LocationId>,
    pub to_location: Option<LocationId>,
    pub qty: Quantity,
    pub timestamp: DateTime<Utc>,
}

impl Entity for Movement {
    type Id = MovementId;
    const KIND: EntityKind = EntityKind::Movement;

    fn id(&self) -> &Self::Id {
        &self.movement_id
    }

    fn label(&self) -> &str {
        self.movement_id.as_str()
    }
}

/// Raw movement fields as submitted by a caller.
///
/// Empty strings for the location fields mean "not set".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementInput {
    pub product_id: String,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub qty: i64,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A movement to be recorded under a caller-chosen id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    pub movement_id: String,
    pub input: MovementInput,
}

impl NewMovement {
    pub fn validate(self) -> DomainResult<(MovementId, MovementDraft)> {
        let draft = self.input.validate()?;
        let movement_id = MovementId::parse(&self.movement_id)?;
        Ok((movement_id, draft))
    }
}

/// A movement that passed shape validation but whose references are not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    pub product_id: ProductId,
    pub from_location: Option<LocationId>,
    pub to_location: Option<LocationId>,
    pub qty: Quantity,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MovementInput {
    pub fn validate(self) -> DomainResult<MovementDraft> {
        let product_id = ProductId::parse(&self.product_id)?;
        let qty = Quantity::new(self.qty)?;
        let from_location = text::optional(self.from_location)
            .map(|s| LocationId::parse(&s))
            .transpose()?;
        let to_location = text::optional(self.to_location)
            .map(|s| LocationId::parse(&s))
            .transpose()?;

        if from_location.is_none() && to_location.is_none() {
            return Err(DomainError::validation(
                "select at least one location (from or to)",
            ));
        }

        Ok(MovementDraft {
            product_id,
            from_location,
            to_location,
            qty,
            timestamp: self.timestamp,
        })
    }
}

impl MovementDraft {
    /// Locations named by the draft, source first.
    pub fn locations(&self) -> impl Iterator<Item = &LocationId> {
        self.from_location.iter().chain(self.to_location.iter())
    }

    /// Build a new ledger entry; the timestamp defaults to `now`.
    pub fn into_movement(self, movement_id: MovementId, now: DateTime<Utc>) -> Movement {
        Movement {
            movement_id,
            product_id: self.product_id,
            from_location: self.from_location,
            to_location: self.to_location,
            qty: self.qty,
            timestamp: self.timestamp.unwrap_or(now),
        }
    }

    /// Replace the editable fields of `existing`; the id never changes and
    /// the timestamp is kept unless the draft carries one.
    pub fn apply_to(self, existing: &Movement) -> Movement {
        Movement {
            movement_id: existing.movement_id.clone(),
            product_id: self.product_id,
            from_location: self.from_location,
            to_location: self.to_location,
            qty: self.qty,
            timestamp: self.timestamp.unwrap_or(existing.timestamp),
        }
    }
}

/// A movement joined with the display names of what it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementView {
    #[serde(flatten)]
    pub movement: Movement,
    pub product_name: String,
    pub from_location_name: Option<String>,
    pub to_location_name: Option<String>,
}

impl MovementView {
    /// Case-sensitive substring match over the movement id, the product id
    /// and name, and the id and name of both locations.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let m = &self.movement;
        let fields = [
            Some(m.movement_id.as_str()),
            Some(m.product_id.as_str()),
            Some(self.product_name.as_str()),
            m.from_location.as_ref().map(LocationId::as_str),
            self.from_location_name.as_deref(),
            m.to_location.as_ref().map(LocationId::as_str),
            self.to_location_name.as_deref(),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|field| text::contains(field, query))
    }
}
