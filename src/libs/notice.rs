//! Severity-tagged notices shown in a single banner.
//!
//! The banner holds at most one notice. A notice with a duration carries its
//! own expiry instant, so an expiry check that runs after the notice has been
//! replaced or cleared can only ever see the newer state.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{}", tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notice {
    /// A zero `duration` means the notice stays until explicitly cleared, and
    /// so does one whose expiry would fall outside the representable range.
    pub fn new(message: impl Into<String>, severity: Severity, duration: Duration, now: DateTime<Utc>) -> Self {
        let expires_at = if duration > Duration::zero() { now.checked_add_signed(duration) } else { None };
        Notice {
            message: message.into(),
            severity,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// CSS class the banner element carries for this notice.
    pub fn css_class(&self) -> String {
        format!("error-message error-{}", self.severity)
    }
}

#[derive(Debug, Default)]
pub struct Banner {
    notice: Option<Notice>,
}

impl Banner {
    pub fn show(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear(&mut self) {
        self.notice = None;
    }

    /// Active notice, ignoring one whose expiry has passed.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| !notice.is_expired(now))
    }

    /// Drops an expired notice. Returns `true` when something was dismissed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        if self.notice.as_ref().is_some_and(|notice| notice.is_expired(now)) {
            self.notice = None;
            return true;
        }
        false
    }
}
