//! Delivery note service providing the create/list/get/send operations.

use model::{DeliveryNote, NewDeliveryNote, NoteId};
use note_store::NoteStore;

use crate::error::DomainError;

/// Service for managing delivery notes.
///
/// Owns the store handle it was constructed with; every mutating operation
/// commits through a single `NoteStore::save` before returning.
pub struct DeliveryNoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> DeliveryNoteService<S> {
    /// Creates a new service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a draft note with its items.
    ///
    /// Fails with `Validation` for malformed input and `DuplicateCode` when
    /// the code is already taken; in both cases nothing is stored.
    #[tracing::instrument(skip(self, input), fields(code = %input.header.code))]
    pub async fn create(&self, input: NewDeliveryNote) -> Result<DeliveryNote, DomainError> {
        let note = DeliveryNote::draft(input).inspect_err(|err| {
            metrics::counter!("delivery_notes_rejected_total", "reason" => "validation")
                .increment(1);
            tracing::debug!(field = err.field(), error = %err, "delivery note rejected");
        })?;

        self.store.save(&note).await.map_err(|err| {
            let err = DomainError::from(err);
            if err.is_conflict() {
                metrics::counter!("delivery_notes_rejected_total", "reason" => "duplicate_code")
                    .increment(1);
            }
            err
        })?;

        metrics::counter!("delivery_notes_created_total").increment(1);
        tracing::info!(
            note_id = %note.id(),
            items = note.items().len(),
            "delivery note created"
        );
        Ok(note)
    }

    /// Returns every note with its items, in no particular order.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<DeliveryNote>, DomainError> {
        Ok(self.store.list().await?)
    }

    /// Loads a note by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: NoteId) -> Result<DeliveryNote, DomainError> {
        self.store.get(id).await?.ok_or(DomainError::NotFound(id))
    }

    /// Sends a note for signature, moving it to `pending_sign`.
    ///
    /// Last write wins when two sends race on the same note.
    #[tracing::instrument(skip(self))]
    pub async fn send(&self, id: NoteId) -> Result<DeliveryNote, DomainError> {
        let mut note = self.get(id).await?;

        let previous = note.send().inspect_err(|err| {
            metrics::counter!("delivery_notes_rejected_total", "reason" => "invalid_transition")
                .increment(1);
            tracing::warn!(note_id = %id, state = %err.current, "send rejected");
        })?;

        self.store.save(&note).await?;

        metrics::counter!("delivery_notes_sent_total").increment(1);
        tracing::info!(note_id = %id, from = %previous, "delivery note sent for signature");
        Ok(note)
    }
}
