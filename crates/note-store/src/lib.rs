//! Persistence for delivery note aggregates.
//!
//! A note and its items are always written together in one atomic unit.
//! [`PostgresNoteStore`] is the durable implementation; [`InMemoryNoteStore`]
//! offers the same contract for tests and database-less runs.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryNoteStore;
pub use postgres::PostgresNoteStore;
pub use store::NoteStore;
