use model::NoteId;
use thiserror::Error;

/// Errors that can occur when interacting with the note store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another note already uses this code.
    #[error("Delivery note code already exists: {0}")]
    DuplicateCode(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be mapped back onto the aggregate.
    #[error("Corrupt data for delivery note {note_id}: {reason}")]
    Corrupt { note_id: NoteId, reason: String },
}

/// Result type for note store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
