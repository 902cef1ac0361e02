pub mod delivery_notes;
pub mod health;
pub mod metrics;
