// User-facing notification fan-in (toast analog)

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient user-visible message. The shell decides how to render it;
/// everything below the shell only emits.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

/// Cloneable sender handle shared across the context. Emitting never fails:
/// once the receiving shell is gone the messages are dropped silently.
#[derive(Clone)]
pub struct Notifier {
    tx: UnboundedSender<Notification>,
}

impl Notifier {
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(NotifyLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(NotifyLevel::Info, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(NotifyLevel::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(NotifyLevel::Error, message.into());
    }

    fn emit(&self, level: NotifyLevel, message: String) {
        let _ = self.tx.send(Notification { level, message });
    }
}
