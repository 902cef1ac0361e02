//! Delivery note lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The state of a delivery note in its signature workflow.
///
/// State transitions:
/// ```text
/// Draft ──┬──► PendingSign ──► Signed
/// Sent ───┘         │
///                   └────────► Rejected
/// ```
///
/// Only the `send` transition (into `PendingSign`) is currently exposed.
/// `Signed` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryState {
    /// Newly created, still editable by the subcontractor.
    #[default]
    Draft,

    /// Handed over to the contractor.
    Sent,

    /// Waiting for the contractor's signature.
    PendingSign,

    /// Signed by the contractor (terminal state).
    Signed,

    /// Rejected by the contractor (terminal state).
    Rejected,
}

impl DeliveryState {
    /// All states, in lifecycle order.
    pub const ALL: [DeliveryState; 5] = [
        DeliveryState::Draft,
        DeliveryState::Sent,
        DeliveryState::PendingSign,
        DeliveryState::Signed,
        DeliveryState::Rejected,
    ];

    /// Returns true if the note can be sent for signature in this state.
    pub fn can_send(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        match self {
            DeliveryState::Signed | DeliveryState::Rejected => true,
            DeliveryState::Draft | DeliveryState::Sent | DeliveryState::PendingSign => false,
        }
    }

    /// Returns the wire/storage name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryState::Draft => "draft",
            DeliveryState::Sent => "sent",
            DeliveryState::PendingSign => "pending_sign",
            DeliveryState::Signed => "signed",
            DeliveryState::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for DeliveryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown state name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown delivery state: {0}")]
pub struct UnknownState(pub String);

impl std::str::FromStr for DeliveryState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeliveryState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownState(s.to_string()))
    }
}
