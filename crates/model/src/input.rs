//! Write projection: what a caller submits to create a note.
//!
//! Identifiers and state are system-controlled and have no field here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PartyId, ValidationError};

/// Header fields of a delivery note, shared by the write and read projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteHeader {
    /// Externally supplied code, unique across all notes.
    pub code: String,
    pub contractor_id: PartyId,
    pub subcontractor_id: PartyId,
    pub site_name: String,
    /// Calendar date of the delivery.
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NoteHeader {
    /// Checks required fields and length limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("code", &self.code, crate::CODE_MAX_LEN)?;
        check_text("site_name", &self.site_name, crate::SITE_NAME_MAX_LEN)?;
        Ok(())
    }
}

/// Payload for creating a delivery note together with its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeliveryNote {
    #[serde(flatten)]
    pub header: NoteHeader,
    #[serde(default)]
    pub items: Vec<NewDeliveryItem>,
}

impl NewDeliveryNote {
    /// Creates a payload with no notes and no items.
    pub fn new(
        code: impl Into<String>,
        contractor_id: i64,
        subcontractor_id: i64,
        site_name: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            header: NoteHeader {
                code: code.into(),
                contractor_id: PartyId::new(contractor_id),
                subcontractor_id: PartyId::new(subcontractor_id),
                site_name: site_name.into(),
                date,
                notes: None,
            },
            items: Vec::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.header.notes = Some(notes.into());
        self
    }

    pub fn with_item(mut self, item: NewDeliveryItem) -> Self {
        self.items.push(item);
        self
    }
}

/// Payload for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeliveryItem {
    pub description: String,
    pub quantity: Decimal,
    /// Unit of measure, e.g. `m3` or `kg`.
    pub unit: String,
    pub unit_price: Decimal,
}

impl NewDeliveryItem {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit: unit.into(),
            unit_price,
        }
    }
}

/// Rejects blank values and values longer than `max` characters.
pub(crate) fn check_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 26).unwrap()
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let input: NewDeliveryNote = serde_json::from_value(serde_json::json!({
            "code": "DN-0001",
            "contractor_id": 10,
            "subcontractor_id": 20,
            "site_name": "Main Square Site",
            "date": "2025-09-26"
        }))
        .unwrap();

        assert_eq!(input.header.code, "DN-0001");
        assert_eq!(input.header.date, date());
        assert_eq!(input.header.notes, None);
        assert!(input.items.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_missing_required_field() {
        let result = serde_json::from_value::<NewDeliveryNote>(serde_json::json!({
            "code": "DN-0001",
            "contractor_id": 10,
            "site_name": "Main Square Site",
            "date": "2025-09-26"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_item_amounts_from_numbers() {
        let item: NewDeliveryItem = serde_json::from_value(serde_json::json!({
            "description": "Concrete H25",
            "quantity": 3.5,
            "unit": "m3",
            "unit_price": 95.0
        }))
        .unwrap();
        assert_eq!(item.quantity, Decimal::new(35, 1));
        assert_eq!(item.unit_price, Decimal::from(95));
    }

    #[test]
    fn test_header_validation() {
        let ok = NewDeliveryNote::new("DN-1", 1, 2, "Site", date());
        assert!(ok.header.validate().is_ok());

        let blank = NewDeliveryNote::new("   ", 1, 2, "Site", date());
        assert_eq!(
            blank.header.validate(),
            Err(ValidationError::Required {
                field: "code".to_string()
            })
        );

        let long = NewDeliveryNote::new("X".repeat(51), 1, 2, "Site", date());
        assert_eq!(
            long.header.validate(),
            Err(ValidationError::TooLong {
                field: "code".to_string(),
                max: 50,
                actual: 51
            })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(check_text("code", &"ñ".repeat(50), 50).is_ok());
    }
}
