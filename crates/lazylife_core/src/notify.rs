//! User-facing failure channel provided by the view layer.

use log::warn;
use std::cell::RefCell;

/// Receives messages for mutations the user attempted but that were refused.
pub trait Notifier {
    fn notify_failure(&self, message: &str);
}

/// Writes failures to the log only; for headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_failure(&self, message: &str) {
        warn!(
            "event=user_notice module=notify status=rejected message={}",
            crate::logging::single_line(message, 200)
        );
    }
}

/// Keeps every message in memory, e.g. for a toast queue or tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Returns and clears pending messages.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }
}

impl Notifier for RecordingNotifier {
    fn notify_failure(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
