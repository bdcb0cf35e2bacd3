//! Checkout submission state machine.

use serde::{Deserialize, Serialize};

/// The phase of a checkout attempt.
///
/// Phase transitions:
/// ```text
/// Idle ──► Submitting ──┬──► Succeeded ──► Idle
///                       └──► Failed ────► Idle
/// ```
///
/// `Succeeded` and `Failed` are passed through while the coordinator
/// reconciles caches and cart; by the time a submission returns, the
/// phase is back at `Idle` and the next attempt can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutPhase {
    /// No submission is running.
    #[default]
    Idle,

    /// The order request is on its way to the backend.
    Submitting,

    /// The backend accepted the order; reconciliation in progress.
    Succeeded,

    /// The submission failed; rollback in progress.
    Failed,
}

impl CheckoutPhase {
    /// Returns true if a new submission may start.
    pub fn can_submit(&self) -> bool {
        matches!(self, CheckoutPhase::Idle)
    }

    /// Returns true if a submission is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, CheckoutPhase::Submitting)
    }

    /// Returns true if the backend has answered but reconciliation has
    /// not finished.
    pub fn is_settling(&self) -> bool {
        matches!(self, CheckoutPhase::Succeeded | CheckoutPhase::Failed)
    }

    /// Returns the phase name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::Idle => "Idle",
            CheckoutPhase::Submitting => "Submitting",
            CheckoutPhase::Succeeded => "Succeeded",
            CheckoutPhase::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
