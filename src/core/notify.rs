use crate::domain::model::{Notification, ToastKind};
use crate::utils::error::{DashError, Result};
use tokio::sync::mpsc;

/// Non-blocking user notifications. Producers enqueue, a single consumer drains.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    sender: mpsc::UnboundedSender<Notification>,
}

pub struct ToastReceiver {
    receiver: mpsc::UnboundedReceiver<Notification>,
}

impl ToastQueue {
    pub fn channel() -> (Self, ToastReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, ToastReceiver { receiver })
    }

    /// Queues `message` with the default kind.
    pub fn show(&self, message: impl Into<String>) -> Result<()> {
        self.show_toast(message, ToastKind::default())
    }

    pub fn show_toast(&self, message: impl Into<String>, kind: ToastKind) -> Result<()> {
        let notification = Notification {
            message: message.into(),
            kind,
        };
        tracing::debug!("Queueing {} toast: {}", kind.as_str(), notification.message);
        self.sender
            .send(notification)
            .map_err(|_| DashError::NotificationClosed)
    }
}

impl ToastReceiver {
    pub async fn next(&mut self) -> Option<Notification> {
        self.receiver.recv().await
    }

    /// Everything queued so far, without waiting.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut pending = Vec::new();
        while let Ok(notification) = self.receiver.try_recv() {
            pending.push(notification);
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn show_defaults_to_success() {
        let (queue, mut rx) = ToastQueue::channel();
        queue.show("Saved").unwrap();

        let n = rx.next().await.unwrap();
        assert_eq!(n.message, "Saved");
        assert_eq!(n.kind, ToastKind::Success);
    }

    #[test]
    fn kind_is_carried_and_order_preserved() {
        let (queue, mut rx) = ToastQueue::channel();
        queue.show_toast("first", ToastKind::Error).unwrap();
        queue.show_toast("second", ToastKind::Warning).unwrap();

        let pending = rx.drain();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].kind, ToastKind::Error);
        assert_eq!(pending[1].message, "second");
        assert_eq!(pending[1].kind, ToastKind::Warning);
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn show_after_receiver_dropped_fails() {
        let (queue, rx) = ToastQueue::channel();
        drop(rx);
        assert!(matches!(
            queue.show("lost"),
            Err(DashError::NotificationClosed)
        ));
    }

    #[test]
    fn empty_and_blank_messages_are_delivered() {
        let (queue, mut rx) = ToastQueue::channel();
        queue.show("").unwrap();
        queue.show_toast("  ", ToastKind::Info).unwrap();

        let pending = rx.drain();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].message, "");
        assert_eq!(pending[1].message, "  ");
    }

    #[test]
    fn show_does_not_wait_for_consumer() {
        let (queue, mut rx) = ToastQueue::channel();
        for i in 0..1000 {
            queue.show(format!("toast {}", i)).unwrap();
        }
        assert_eq!(rx.drain().len(), 1000);
    }
}
