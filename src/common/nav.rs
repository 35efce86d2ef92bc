// Navigation event channel and canonical path constants

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Paths redirected to by guards and the request client.
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const DASHBOARD: &str = "/dashboard";
    pub const MY_LOAN: &str = "/dashboard/my-loan";
}

/// Cloneable navigation handle. Redirect side effects are modeled as events
/// on this channel rather than performed inside decision code, so the
/// decision table stays a pure function.
#[derive(Clone)]
pub struct Navigator {
    tx: UnboundedSender<String>,
}

impl Navigator {
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Request navigation to `path`. Dropping the receiving shell makes this
    /// a no-op rather than an error.
    pub fn go(&self, path: impl Into<String>) {
        let _ = self.tx.send(path.into());
    }
}
