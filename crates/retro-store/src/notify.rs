//! User-visible notifications
//!
//! The store decides *when* to notify; a [`StageNotifier`] decides *how*.

use parking_lot::Mutex;

/// Message shown once the facilitator distributes action items
pub const DISTRIBUTION_NOTICE: &str = "The facilitator has distributed this retro's action items. \
You will receive an email breakdown shortly.";

/// Sink for blocking, user-visible notices
pub trait StageNotifier: Send + Sync {
    /// Present `message` to the user
    fn notify(&self, message: &str);
}

/// Notifier that writes notices to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl StageNotifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "retro_store::notice", "{message}");
    }
}

/// Notifier that keeps every notice in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl StageNotifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
