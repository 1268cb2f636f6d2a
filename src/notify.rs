//! Single-slot transient notification channel.
//!
//! Two states: idle (nothing visible) and showing (exactly one message).
//! A new message pre-empts an unseen one and resets the dismiss timer; last
//! writer wins, nothing is queued. Nothing blocks on this machine.

use std::time::{Duration, Instant};

/// Visible for 6 seconds unless dismissed or replaced.
pub const DISMISS_AFTER: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<(Notification, Instant)>,
}

impl Notifier {
    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some((
            Notification {
                message: message.into(),
                severity,
            },
            now + DISMISS_AFTER,
        ));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the message once its deadline has passed. Called from the UI tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some((_, deadline)) = &self.current {
            if now >= *deadline {
                self.current = None;
            }
        }
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }
}
