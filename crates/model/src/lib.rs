//! Aggregate model for delivery notes.
//!
//! A delivery note is the aggregate root; its line items are owned children
//! that are created with the note and never outlive it. This crate holds the
//! shapes and static constraints only:
//! - typed identifiers for notes, items and parties
//! - the closed [`DeliveryState`] lifecycle enum
//! - [`Amount`], the two-fraction-digit decimal used for quantities and prices
//! - the write projection ([`NewDeliveryNote`]) accepted from callers and the
//!   read projection ([`DeliveryNote`]) returned to them

pub mod amount;
pub mod error;
pub mod ids;
pub mod input;
pub mod note;
pub mod state;

pub use amount::Amount;
pub use error::{TransitionError, ValidationError};
pub use ids::{ItemId, NoteId, PartyId};
pub use input::{NewDeliveryItem, NewDeliveryNote, NoteHeader};
pub use note::{DeliveryItem, DeliveryNote};
pub use state::{DeliveryState, UnknownState};

/// Maximum length of a note code, in characters.
pub const CODE_MAX_LEN: usize = 50;
/// Maximum length of a site name, in characters.
pub const SITE_NAME_MAX_LEN: usize = 120;
/// Maximum length of an item description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 200;
/// Maximum length of an item unit of measure, in characters.
pub const UNIT_MAX_LEN: usize = 20;
