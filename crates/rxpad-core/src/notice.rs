//! User-visible transient notifications.
//!
//! A [`NoticeQueue`] is created once by the host and handed to whatever needs to report
//! outcomes. Hosts drain it to show toasts, status lines, or log output.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Errors that may carry a message meant for the user (typically from the backend).
pub trait UserFacing {
    fn user_message(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Error notice preferring the error's own user message over `fallback`.
    pub fn from_error<E: UserFacing + ?Sized>(err: &E, fallback: &str) -> Self {
        Self::error(err.user_message().unwrap_or_else(|| fallback.to_string()))
    }
}

/// FIFO of pending notices.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.pending.push_back(notice);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notice::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notice::error(message));
    }

    /// Most recent notice, without consuming it.
    pub fn latest(&self) -> Option<&Notice> {
        self.pending.back()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Backend(Option<&'static str>);

    impl UserFacing for Backend {
        fn user_message(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_backend_message_preferred() {
        let notice = Notice::from_error(&Backend(Some("Email already registered")), "Signup failed");
        assert_eq!(notice.message, "Email already registered");
        assert_eq!(notice.level, NoticeLevel::Error);

        let notice = Notice::from_error(&Backend(None), "Signup failed");
        assert_eq!(notice.message, "Signup failed");
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = NoticeQueue::new();
        queue.success("saved");
        queue.error("failed");
        assert_eq!(queue.latest().unwrap().message, "failed");

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "saved");
        assert!(queue.is_empty());
    }
}
