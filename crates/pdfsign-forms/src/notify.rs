//! User-visible, non-fatal notifications

use std::cell::RefCell;
use std::rc::Rc;

pub const PAGE_COUNT_FAILED: &str = "Could not retrieve page count";
pub const PAGE_SCHEMES_FAILED: &str = "Could not retrieve page schemes";

pub trait Notifier {
    /// Show a transient message. Must not fail.
    fn notify(&self, message: &str);
}

/// Keeps every message; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
