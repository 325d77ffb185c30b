//! Live-region announcements and transient notifications.
//!
//! Both are time-limited messages: an announcement clears itself after
//! [`ANNOUNCEMENT_TTL`], a notification after [`NOTIFICATION_TTL`]. Expiry
//! is evaluated lazily against a caller-supplied instant so nothing needs a
//! timer thread.

use std::time::{Duration, Instant};

use tracing::debug;

pub const ANNOUNCEMENT_TTL: Duration = Duration::from_secs(1);
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// The single shared status region read by assistive technology.
#[derive(Debug, Clone)]
pub struct Announcer {
    current: Option<(String, Instant)>,
    ttl: Duration,
    history: Vec<String>,
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new(ANNOUNCEMENT_TTL)
    }
}

impl Announcer {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            ttl,
            history: Vec::new(),
        }
    }

    pub fn announce(&mut self, message: impl Into<String>) {
        self.announce_at(message, Instant::now());
    }

    pub fn announce_at(&mut self, message: impl Into<String>, at: Instant) {
        let message = message.into();
        debug!(message = %message, "announce");
        self.history.push(message.clone());
        self.current = Some((message, at));
    }

    /// Message still visible at `now`.
    pub fn message_at(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < self.ttl)
            .map(|(message, _)| message.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.message_at(Instant::now())
    }

    /// Most recent announcement, expired or not.
    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// Every announcement made so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created: Instant,
}

impl Notification {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) < NOTIFICATION_TTL
    }
}

/// Holds the latest transient notification. A new notification replaces
/// the previous one.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Notification>,
}

impl Notifier {
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notify_at(kind, message, Instant::now());
    }

    pub fn notify_at(&mut self, kind: NotificationKind, message: impl Into<String>, at: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            kind,
            created: at,
        });
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().filter(|n| n.is_visible_at(now))
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    /// Latest notification regardless of expiry.
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
