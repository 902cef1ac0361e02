use async_trait::async_trait;
use model::{DeliveryNote, NoteId};

use crate::Result;

/// Core trait for delivery note storage.
///
/// Implementations must be thread-safe (Send + Sync) and must apply every
/// write atomically: after `save` returns `Ok`, the whole aggregate is visible
/// to subsequent `get`/`list` calls; after an error, nothing of it is.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Inserts or updates a note together with its items.
    ///
    /// Item rows that are no longer part of the aggregate are removed.
    /// Fails with `DuplicateCode` if another note already uses the code.
    async fn save(&self, note: &DeliveryNote) -> Result<()>;

    /// Loads one note with its items.
    ///
    /// Returns None if no note has this identifier.
    async fn get(&self, id: NoteId) -> Result<Option<DeliveryNote>>;

    /// Loads every note with its items.
    ///
    /// Callers must not rely on the order.
    async fn list(&self) -> Result<Vec<DeliveryNote>>;
}
