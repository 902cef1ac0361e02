use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use model::{DeliveryNote, NoteId};
use tokio::sync::RwLock;

use crate::{Result, StoreError, store::NoteStore};

/// In-memory note store implementation for testing.
///
/// This implementation keeps all notes in memory and provides the same
/// interface as the PostgreSQL implementation, including the uniqueness
/// check on `code`.
#[derive(Clone, Default)]
pub struct InMemoryNoteStore {
    notes: Arc<RwLock<HashMap<NoteId, DeliveryNote>>>,
}

impl InMemoryNoteStore {
    /// Creates a new empty in-memory note store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of notes stored.
    pub async fn note_count(&self) -> usize {
        self.notes.read().await.len()
    }

    /// Returns the total number of items across all notes.
    pub async fn item_count(&self) -> usize {
        self.notes
            .read()
            .await
            .values()
            .map(|note| note.items().len())
            .sum()
    }

    /// Clears all notes.
    pub async fn clear(&self) {
        self.notes.write().await.clear();
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn save(&self, note: &DeliveryNote) -> Result<()> {
        let mut store = self.notes.write().await;

        // Unique constraint simulation
        let taken = store
            .values()
            .any(|other| other.id() != note.id() && other.code() == note.code());
        if taken {
            return Err(StoreError::DuplicateCode(note.code().to_string()));
        }

        store.insert(note.id(), note.clone());
        Ok(())
    }

    async fn get(&self, id: NoteId) -> Result<Option<DeliveryNote>> {
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<DeliveryNote>> {
        let store = self.notes.read().await;
        let mut notes: Vec<_> = store.values().cloned().collect();
        notes.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(notes)
    }
}
