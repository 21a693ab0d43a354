//! Transient progress notifications — the toast side channel.
//!
//! Purely advisory: nothing here is persisted, and correctness of the
//! tracked records does not depend on anyone listening.

use serde::Serialize;

use crate::events::SubscriberHub;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Pending,
    Success,
    Error,
}

/// One transient message, addressed by the human-readable label of the
/// operation it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub label: String,
    pub message: String,
}

/// Fan-out hub for progress notifications.
pub struct Notifier {
    hub: SubscriberHub<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            hub: SubscriberHub::new(),
        }
    }

    pub fn subscribe(&self) -> (String, mpsc::Receiver<Notification>) {
        self.hub.subscribe()
    }

    pub fn unsubscribe(&self, subscriber_id: &str) {
        self.hub.unsubscribe(subscriber_id);
    }

    fn emit(&self, kind: NotificationKind, label: &str, message: String) {
        self.hub.emit(Notification {
            kind,
            label: label.to_string(),
            message,
        });
    }

    /// Signature request sent to the user's wallet.
    pub(crate) fn signature_pending(&self, label: &str) {
        self.emit(
            NotificationKind::Pending,
            label,
            format!("{} confirmation is pending", label),
        );
    }

    /// The signature request failed or was declined.
    pub(crate) fn signature_rejected(&self, label: &str) {
        self.emit(
            NotificationKind::Error,
            label,
            format!("{} confirmation was rejected", label),
        );
    }

    /// Broadcast accepted, waiting for chain inclusion.
    pub(crate) fn confirmation_pending(&self, label: &str) {
        self.emit(
            NotificationKind::Pending,
            label,
            format!("{} is pending", label),
        );
    }

    /// Confirmed on-chain with a success status.
    pub(crate) fn completed(&self, label: &str) {
        self.emit(
            NotificationKind::Success,
            label,
            format!("{} has completed", label),
        );
    }

    /// Confirmed on-chain with a failure status, or the confirmation
    /// wait itself failed.
    pub(crate) fn reverted(&self, label: &str) {
        self.emit(
            NotificationKind::Error,
            label,
            format!("{} was rejected", label),
        );
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_messages() {
        let notifier = Notifier::new();
        let (_id, mut rx) = notifier.subscribe();

        notifier.signature_pending("Delegate deposit");
        notifier.confirmation_pending("Delegate deposit");
        notifier.completed("Delegate deposit");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.kind, NotificationKind::Pending);
        assert_eq!(first.message, "Delegate deposit confirmation is pending");

        let second = rx.try_recv().unwrap();
        assert_eq!(second.message, "Delegate deposit is pending");

        let third = rx.try_recv().unwrap();
        assert_eq!(third.kind, NotificationKind::Success);
        assert_eq!(third.message, "Delegate deposit has completed");
        assert_eq!(third.label, "Delegate deposit");
    }
}
