//! Transient, auto-dismissing notifications.
//!
//! A notice goes through three steps on its [`NotificationSurface`]: it is
//! appended visible, asked to hide after the dismiss delay, and removed.
//! Surfaces that animate the hide report the end of the animation through
//! [`NotificationCenter::transition_ended`]; removal waits for that signal
//! instead of a second timer, so a notice never vanishes mid-animation.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::oneshot;
use uuid::Uuid;

/// Identifies one notice on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Visual tone of a notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
}

impl Severity {
    /// CSS class name used by the stylesheet.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// How a surface hides a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideTransition {
    /// Hidden immediately; remove right away.
    Instant,
    /// Animating; remove once `transition_ended` is reported.
    Animated,
}

/// Where notices are displayed.
pub trait NotificationSurface: Send + Sync {
    /// Append a visible notice.
    fn append(&self, id: NotificationId, message: &str, severity: Severity);

    /// Start hiding a notice.
    fn hide(&self, id: NotificationId) -> HideTransition;

    /// Remove a notice from the display list.
    fn remove(&self, id: NotificationId);
}

type PendingHides = Arc<Mutex<HashMap<NotificationId, oneshot::Sender<()>>>>;

/// Emits notices onto a surface and dismisses them.
#[derive(Clone)]
pub struct NotificationCenter {
    surface: Arc<dyn NotificationSurface>,
    dismiss_after: Duration,
    hiding: PendingHides,
}

impl NotificationCenter {
    /// Create a center that dismisses notices after `dismiss_after`.
    #[must_use]
    pub fn new(surface: Arc<dyn NotificationSurface>, dismiss_after: Duration) -> Self {
        Self {
            surface,
            dismiss_after,
            hiding: Arc::default(),
        }
    }

    /// Show a success notice.
    pub fn success(&self, message: &str) -> NotificationId {
        self.show(message, Severity::Success)
    }

    /// Show an error notice.
    pub fn error(&self, message: &str) -> NotificationId {
        self.show(message, Severity::Error)
    }

    /// Show a notice and schedule its dismissal.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn show(&self, message: &str, severity: Severity) -> NotificationId {
        let id = NotificationId::new();
        tracing::debug!(%id, severity = severity.as_str(), message, "Showing notification");
        self.surface.append(id, message, severity);

        let surface = Arc::clone(&self.surface);
        let hiding: Weak<_> = Arc::downgrade(&self.hiding);
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let (done_tx, done_rx) = oneshot::channel();
            let registered = match hiding.upgrade() {
                Some(pending) => {
                    lock(&pending).insert(id, done_tx);
                    true
                }
                None => false,
            };

            if surface.hide(id) == HideTransition::Animated && registered {
                // Errs once every center handle is dropped, taking the sender with it.
                let _ = done_rx.await;
            }
            if let Some(pending) = hiding.upgrade() {
                lock(&pending).remove(&id);
            }
            surface.remove(id);
        });

        id
    }

    /// Report that a notice finished its hide animation.
    ///
    /// Ignored for notices that are not hiding.
    pub fn transition_ended(&self, id: NotificationId) {
        if let Some(done) = lock(&self.hiding).remove(&id) {
            let _ = done.send(());
        }
    }
}

fn lock(
    pending: &PendingHides,
) -> std::sync::MutexGuard<'_, HashMap<NotificationId, oneshot::Sender<()>>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}
