//! Decoupled notification channel for ambient error banners.
//!
//! The gateway publishes; UI shells subscribe and render toasts. The
//! gateway never knows anything about rendering.

use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing condition worth a toast.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Server-provided backoff hint, set on rate-limit notices.
    pub retry_after_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Subscribe to notices. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Publish a notice. Lossy by design: no subscribers, no problem.
    pub fn publish(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.publish(Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
            retry_after_secs: None,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
            retry_after_secs: None,
        });
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
    fn subscribers_receive_published_notices() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();

        notifier.warning("stock running low");

        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "stock running low");
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        Notifier::new().error("nobody listening");
    }
}
