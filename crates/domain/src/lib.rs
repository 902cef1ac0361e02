//! Domain layer for delivery notes.
//!
//! This crate provides the lifecycle and persistence service that sits
//! between the request layer and the note store:
//! - creating a note and its items as one atomic unit
//! - listing and fetching notes
//! - the `send` transition into `pending_sign`

pub mod delivery_note;
pub mod error;

pub use delivery_note::DeliveryNoteService;
pub use error::DomainError;
pub use model::{
    Amount, DeliveryItem, DeliveryNote, DeliveryState, ItemId, NewDeliveryItem, NewDeliveryNote,
    NoteHeader, NoteId, PartyId, TransitionError, ValidationError,
};
