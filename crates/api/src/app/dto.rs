use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use stockroom_core::DomainError;
use stockroom_inventory::{Balance, Movement, MovementInput, MovementView, NewMovement};
use stockroom_locations::{Location, LocationChanges, NewLocation};
use stockroom_products::{NewProduct, Product, ProductChanges};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// `?search=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchParams {
    pub fn query(&self) -> &str {
        self.search.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Body of `/products/add` and `/products/edit/{id}`.
///
/// Every field is optional here so that missing fields come back as
/// validation errors from the domain rather than as deserialization failures.
#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductRequest {
    pub fn into_new(self) -> NewProduct {
        NewProduct {
            product_id: self.product_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
        }
    }

    /// The id in the body, if any, is ignored: ids are immutable.
    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.name.unwrap_or_default(),
            description: self.description,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationRequest {
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl LocationRequest {
    pub fn into_new(self) -> NewLocation {
        NewLocation {
            location_id: self.location_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            address: self.address,
        }
    }

    pub fn into_changes(self) -> LocationChanges {
        LocationChanges {
            name: self.name.unwrap_or_default(),
            address: self.address,
        }
    }
}

/// A quantity as submitted: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QtyField {
    Number(i64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct MovementRequest {
    #[serde(default)]
    pub movement_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub from_location: Option<String>,
    #[serde(default)]
    pub to_location: Option<String>,
    #[serde(default)]
    pub qty: Option<QtyField>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MovementRequest {
    fn into_input(self) -> Result<MovementInput, DomainError> {
        Ok(MovementInput {
            qty: parse_qty(self.qty)?,
            product_id: self.product_id.unwrap_or_default(),
            from_location: self.from_location,
            to_location: self.to_location,
            timestamp: self.timestamp,
        })
    }

    pub fn into_new(mut self) -> Result<NewMovement, DomainError> {
        let movement_id = self.movement_id.take().unwrap_or_default();
        Ok(NewMovement {
            movement_id,
            input: self.into_input()?,
        })
    }

    pub fn into_update(self) -> Result<MovementInput, DomainError> {
        self.into_input()
    }
}

fn parse_qty(qty: Option<QtyField>) -> Result<i64, DomainError> {
    match qty {
        None => Err(DomainError::validation("qty is required")),
        Some(QtyField::Number(n)) => Ok(n),
        Some(QtyField::Text(s)) if s.trim().is_empty() => {
            Err(DomainError::validation("qty is required"))
        }
        Some(QtyField::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::validation(format!("qty must be a whole number, got {s:?}"))),
    }
}

/// Unwrap a JSON body, turning malformed input into a validation response.
pub fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    payload.map(|Json(v)| v).map_err(|rejection| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            rejection.body_text(),
        )
    })
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    serde_json::json!({
        "product_id": p.product_id.as_str(),
        "name": p.name,
        "description": p.description,
    })
}

pub fn location_to_json(l: &Location) -> serde_json::Value {
    serde_json::json!({
        "location_id": l.location_id.as_str(),
        "name": l.name,
        "address": l.address,
    })
}

pub fn movement_to_json(m: &Movement) -> serde_json::Value {
    serde_json::json!({
        "movement_id": m.movement_id.as_str(),
        "product_id": m.product_id.as_str(),
        "from_location": m.from_location.as_ref().map(|l| l.as_str()),
        "to_location": m.to_location.as_ref().map(|l| l.as_str()),
        "qty": m.qty.get(),
        "timestamp": m.timestamp.to_rfc3339(),
    })
}

pub fn movement_view_to_json(v: &MovementView) -> serde_json::Value {
    let mut json = movement_to_json(&v.movement);
    json["product_name"] = serde_json::json!(v.product_name);
    json["from_location_name"] = serde_json::json!(v.from_location_name);
    json["to_location_name"] = serde_json::json!(v.to_location_name);
    json
}

pub fn balance_to_json(b: &Balance) -> serde_json::Value {
    serde_json::json!({
        "product_id": b.product_id.as_str(),
        "product_name": b.product_name,
        "location_id": b.location_id.as_str(),
        "location_name": b.location_name,
        "balance": b.balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qty_accepts_numbers_and_numeric_text() {
        assert_eq!(parse_qty(Some(QtyField::Number(5))), Ok(5));
        assert_eq!(parse_qty(Some(QtyField::Text(" 12 ".into()))), Ok(12));
    }

    #[test]
    fn qty_rejects_missing_and_non_numeric() {
        assert!(parse_qty(None).unwrap_err().is_validation());
        assert!(parse_qty(Some(QtyField::Text("".into()))).unwrap_err().is_validation());
        assert!(parse_qty(Some(QtyField::Text("ten".into()))).unwrap_err().is_validation());
    }

    #[test]
    fn product_edit_ignores_id_in_body() {
        let req: ProductRequest =
            serde_json::from_str(r#"{"product_id": "P999", "name": "Mouse"}"#).unwrap();
        let changes = req.into_changes();
        assert_eq!(changes.name, "Mouse");
        assert_eq!(changes.description, None);
    }

    #[test]
    fn search_query_is_trimmed() {
        let params = SearchParams {
            search: Some("  L00 ".to_string()),
        };
        assert_eq!(params.query(), "L00");
        assert_eq!(SearchParams::default().query(), "");
    }
}
