//! Order status vocabulary.

use serde::{Deserialize, Serialize};

/// The status of a placed order, as the backend reports it.
///
/// Status transitions (driven by the backend):
/// ```text
/// Pending ──► WaitingVerification ──► Paid
///    │                │
///    └────────────────┴──► Cancelled
/// ```
///
/// `Pending` means the order awaits payment; a payment proof upload
/// moves it to `WaitingVerification`, and an admin decision lands it in
/// one of the terminal states. The wire form is `snake_case`, and the
/// set is closed: a status outside it is a parse error, never a silent
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting customer payment.
    #[default]
    Pending,

    /// Payment proof uploaded, awaiting admin verification.
    WaitingVerification,

    /// Payment verified (terminal state).
    Paid,

    /// Order was cancelled (terminal state).
    Cancelled,
}

/// Visual weight a status renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Warning,
    Info,
    Success,
    Danger,
}

impl OrderStatus {
    /// Returns true if a payment proof can be uploaded in this status.
    pub fn awaits_payment_proof(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if this is a terminal status (the backend will not
    /// move the order again).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    /// Returns true if the backend may legally move an order from this
    /// status to `next`.
    pub fn can_progress_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::WaitingVerification)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::WaitingVerification, OrderStatus::Paid)
                | (OrderStatus::WaitingVerification, OrderStatus::Cancelled)
        )
    }

    /// Returns the wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::WaitingVerification => "waiting_verification",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Returns the customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Menunggu Pembayaran",
            OrderStatus::WaitingVerification => "Menunggu Verifikasi",
            OrderStatus::Paid => "Dibayar",
            OrderStatus::Cancelled => "Dibatalkan",
        }
    }

    /// Returns the visual tone the label renders with.
    pub fn tone(&self) -> StatusTone {
        match self {
            OrderStatus::Pending => StatusTone::Warning,
            OrderStatus::WaitingVerification => StatusTone::Info,
            OrderStatus::Paid => StatusTone::Success,
            OrderStatus::Cancelled => StatusTone::Danger,
        }
    }

    /// All statuses the backend can report.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::WaitingVerification,
        OrderStatus::Paid,
        OrderStatus::Cancelled,
    ];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_only_pending_awaits_proof() {
        assert!(OrderStatus::Pending.awaits_payment_proof());
        assert!(!OrderStatus::WaitingVerification.awaits_payment_proof());
        assert!(!OrderStatus::Paid.awaits_payment_proof());
        assert!(!OrderStatus::Cancelled.awaits_payment_proof());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::WaitingVerification.is_terminal());
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(OrderStatus::Pending.can_progress_to(OrderStatus::WaitingVerification));
        assert!(OrderStatus::Pending.can_progress_to(OrderStatus::Cancelled));
        assert!(OrderStatus::WaitingVerification.can_progress_to(OrderStatus::Paid));
        assert!(OrderStatus::WaitingVerification.can_progress_to(OrderStatus::Cancelled));

        assert!(!OrderStatus::Pending.can_progress_to(OrderStatus::Paid));
        assert!(!OrderStatus::Paid.can_progress_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_progress_to(OrderStatus::Pending));
    }

    #[test]
    fn test_wire_form_is_snake_case() {
        let json = serde_json::to_string(&OrderStatus::WaitingVerification).unwrap();
        assert_eq!(json, r#""waiting_verification""#);

        let back: OrderStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(back, OrderStatus::Pending);
    }

    #[test]
    fn test_unknown_status_is_a_parse_error() {
        let result: std::result::Result<OrderStatus, _> = serde_json::from_str(r#""refunded""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_every_status_has_label_and_tone() {
        for status in OrderStatus::ALL {
            assert!(!status.label().is_empty());
            // Pending awaits payment; it must never read as a success.
            if status == OrderStatus::Pending {
                assert_ne!(status.tone(), StatusTone::Success);
            }
        }
    }
}
