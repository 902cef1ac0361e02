//! Read projection: the delivery note aggregate as stored and returned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::input::{NoteHeader, check_text};
use crate::{
    Amount, DeliveryState, ItemId, NewDeliveryItem, NewDeliveryNote, NoteId, PartyId,
    TransitionError, ValidationError,
};

/// A line item owned by a delivery note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryItem {
    pub id: ItemId,
    pub description: String,
    pub quantity: Amount,
    pub unit: String,
    pub unit_price: Amount,
}

impl DeliveryItem {
    /// Validates an item payload and assigns it a fresh identifier.
    ///
    /// `index` is the item's position in the submitted list and is only used
    /// to name the offending field in errors.
    pub fn create(index: usize, input: NewDeliveryItem) -> Result<Self, ValidationError> {
        let field = |name: &str| format!("items[{index}].{name}");

        check_text(
            &field("description"),
            &input.description,
            crate::DESCRIPTION_MAX_LEN,
        )?;
        check_text(&field("unit"), &input.unit, crate::UNIT_MAX_LEN)?;
        let quantity = Amount::parse(&field("quantity"), input.quantity)?;
        let unit_price = Amount::parse(&field("unit_price"), input.unit_price)?;

        Ok(Self {
            id: ItemId::new(),
            description: input.description,
            quantity,
            unit: input.unit,
            unit_price,
        })
    }
}

/// The delivery note aggregate root.
///
/// The state only changes through lifecycle methods such as [`send`](Self::send).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryNote {
    id: NoteId,
    #[serde(flatten)]
    header: NoteHeader,
    state: DeliveryState,
    items: Vec<DeliveryItem>,
}

impl DeliveryNote {
    /// Builds a new draft note from a caller's payload.
    ///
    /// Assigns identifiers to the note and each of its items. Nothing is
    /// persisted here.
    pub fn draft(input: NewDeliveryNote) -> Result<Self, ValidationError> {
        input.header.validate()?;
        let items = input
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| DeliveryItem::create(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: NoteId::new(),
            header: input.header,
            state: DeliveryState::Draft,
            items,
        })
    }

    /// Reassembles a note from persisted parts.
    pub fn restore(
        id: NoteId,
        header: NoteHeader,
        state: DeliveryState,
        items: Vec<DeliveryItem>,
    ) -> Self {
        Self {
            id,
            header,
            state,
            items,
        }
    }

    /// Moves the note to `pending_sign`.
    ///
    /// Allowed from `draft`, `sent` and `pending_sign`; returns the previous state.
    pub fn send(&mut self) -> Result<DeliveryState, TransitionError> {
        let previous = self.state;
        if !previous.can_send() {
            return Err(TransitionError {
                current: previous,
                action: "send",
            });
        }
        self.state = DeliveryState::PendingSign;
        Ok(previous)
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn header(&self) -> &NoteHeader {
        &self.header
    }

    pub fn code(&self) -> &str {
        &self.header.code
    }

    pub fn contractor_id(&self) -> PartyId {
        self.header.contractor_id
    }

    pub fn subcontractor_id(&self) -> PartyId {
        self.header.subcontractor_id
    }

    pub fn site_name(&self) -> &str {
        &self.header.site_name
    }

    pub fn date(&self) -> NaiveDate {
        self.header.date
    }

    pub fn notes(&self) -> Option<&str> {
        self.header.notes.as_deref()
    }

    pub fn state(&self) -> DeliveryState {
        self.state
    }

    /// Items in submission order.
    pub fn items(&self) -> &[DeliveryItem] {
        &self.items
    }
}
