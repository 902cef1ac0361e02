//! Delivery note lifecycle operations.

mod service;

pub use service::DeliveryNoteService;
