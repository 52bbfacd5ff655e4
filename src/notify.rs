//! Transient user-facing notifications.
//!
//! A [`NotificationChannel`] shows at most one message at a time. A new
//! message replaces the visible one and restarts its dismiss timer, so the
//! last call always wins. Messages are also kept in a short history so
//! front-ends without a render loop (the CLI) can drain them after each
//! command.

use core::time::Duration;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// How long a notification stays visible.
pub const DISMISS_AFTER: Duration = Duration::from_secs(4);

/// Maximum number of undrained notifications kept in history.
const HISTORY_CAPACITY: usize = 64;

/// One message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message text, already localized.
    pub message: String,
    /// Whether the message reports a failure.
    pub is_error: bool,
    /// When the message became visible.
    pub shown_at: Instant,
    /// Position in issue order, starting at 1.
    pub sequence: u64,
}

impl Notification {
    /// Returns `true` if the message should still be visible at `now`.
    #[inline]
    #[must_use]
    pub fn is_visible_at(&self, now: Instant, dismiss_after: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) < dismiss_after
    }
}

/// Single-slot notification area with auto-dismiss.
#[derive(Debug)]
pub struct NotificationChannel {
    /// Visible slot and history behind one lock.
    inner: Mutex<Inner>,
    /// Auto-dismiss delay.
    dismiss_after: Duration,
}

/// Mutable channel state.
#[derive(Debug, Default)]
struct Inner {
    /// Currently visible message.
    current: Option<Notification>,
    /// Messages not yet drained, oldest first.
    history: VecDeque<Notification>,
    /// Number of messages issued so far.
    issued: u64,
}

impl Default for NotificationChannel {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel {
    /// Creates a channel with the standard dismiss delay.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_dismiss_after(DISMISS_AFTER)
    }

    /// Creates a channel with a custom dismiss delay.
    #[inline]
    #[must_use]
    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            dismiss_after,
        }
    }

    /// Shows `message`, replacing whatever is visible and restarting the
    /// dismiss timer.
    pub fn notify<T: Into<String>>(&self, message: T, is_error: bool) {
        let message = message.into();
        if is_error {
            tracing::warn!(%message, "notification");
        } else {
            tracing::info!(%message, "notification");
        }

        let mut inner = self.lock();
        inner.issued += 1;
        let notification = Notification {
            message,
            is_error,
            shown_at: Instant::now(),
            sequence: inner.issued,
        };
        if inner.history.len() == HISTORY_CAPACITY {
            let _oldest = inner.history.pop_front();
        }
        inner.history.push_back(notification.clone());
        inner.current = Some(notification);
    }

    /// Returns the visible notification, if it has not been dismissed.
    #[inline]
    #[must_use]
    pub fn visible(&self) -> Option<Notification> {
        self.visible_at(Instant::now())
    }

    /// Returns the notification visible at `now`.
    #[must_use]
    pub fn visible_at(&self, now: Instant) -> Option<Notification> {
        self.lock()
            .current
            .as_ref()
            .filter(|current| current.is_visible_at(now, self.dismiss_after))
            .cloned()
    }

    /// Hides the visible notification immediately.
    #[inline]
    pub fn dismiss(&self) {
        self.lock().current = None;
    }

    /// Removes and returns every notification issued since the last drain.
    #[inline]
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.lock().history.drain(..).collect()
    }

    /// Returns the number of notifications issued so far.
    #[inline]
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.lock().issued
    }

    /// Locks the state. A poisoned lock still holds consistent data since
    /// every update is a single assignment.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_notification_wins() {
        let channel = NotificationChannel::new();
        channel.notify("first", false);
        channel.notify("second", true);
        let visible = channel.visible().unwrap();
        assert_eq!(visible.message, "second");
        assert!(visible.is_error);
        assert_eq!(visible.sequence, 2);
    }

    #[test]
    fn notification_expires_after_delay() {
        let channel = NotificationChannel::new();
        channel.notify("hello", false);
        let shown_at = channel.visible().unwrap().shown_at;
        assert!(channel.visible_at(shown_at + Duration::from_secs(3)).is_some());
        assert!(channel.visible_at(shown_at + DISMISS_AFTER).is_none());
    }

    #[test]
    fn new_message_restarts_timer() {
        let channel = NotificationChannel::new();
        channel.notify("one", false);
        let first_shown = channel.visible().unwrap().shown_at;
        std::thread::sleep(Duration::from_millis(5));
        channel.notify("two", false);
        let second = channel.visible().unwrap();
        assert!(second.shown_at > first_shown);
        assert!(
            channel
                .visible_at(first_shown + DISMISS_AFTER)
                .is_some_and(|n| n.message == "two")
        );
    }

    #[test]
    fn dismiss_hides_message() {
        let channel = NotificationChannel::new();
        channel.notify("bye", false);
        channel.dismiss();
        assert!(channel.visible().is_none());
    }

    #[test]
    fn drain_returns_history_in_order() {
        let channel = NotificationChannel::new();
        channel.notify("a", false);
        channel.notify("b", true);
        let drained: Vec<String> = channel.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(drained, ["a", "b"]);
        assert!(channel.drain().is_empty());
        assert_eq!(channel.issued(), 2);
    }

    #[test]
    fn history_is_capped() {
        let channel = NotificationChannel::new();
        for idx in 0..(HISTORY_CAPACITY + 3) {
            channel.notify(format!("msg {idx}"), false);
        }
        let drained = channel.drain();
        assert_eq!(drained.len(), HISTORY_CAPACITY);
        assert_eq!(drained.first().unwrap().message, "msg 3");
    }
}
