//! Page views rendered as log lines.

use babyshoe_storefront::auth::{AuthFormView, FormLayout, InlineMessage, ResetFormView, Tone};
use babyshoe_storefront::nav::NavView;
use babyshoe_storefront::notify::{HideTransition, NotificationId, NotificationSurface, Severity};

/// Either authentication form.
#[derive(Debug, Default)]
pub struct TerminalForm;

fn print_message(message: &InlineMessage) {
    match message.tone {
        Tone::Success => tracing::info!("{}", message.text),
        Tone::Error => tracing::error!("{}", message.text),
    }
}

impl AuthFormView for TerminalForm {
    fn render(&self, layout: &FormLayout) {
        tracing::debug!(title = layout.title, submit = layout.submit_label, "Form layout");
    }

    fn show_message(&self, message: &InlineMessage) {
        print_message(message);
    }

    fn clear_message(&self) {}

    fn reset_fields(&self) {}
}

impl ResetFormView for TerminalForm {
    fn show_message(&self, message: &InlineMessage) {
        print_message(message);
    }

    fn clear_message(&self) {}

    fn set_submit_enabled(&self, enabled: bool) {
        tracing::debug!(enabled, "Submit control");
    }
}

/// The header.
#[derive(Debug, Default)]
pub struct TerminalNav;

impl NavView for TerminalNav {
    fn show_session_controls(&self, logged_in: bool) {
        if logged_in {
            tracing::info!("Logged in");
        } else {
            tracing::info!("Not logged in");
        }
    }

    fn set_cart_badge(&self, count: Option<u32>) {
        if let Some(count) = count {
            tracing::info!(count, "Cart");
        }
    }
}

/// Notifications; a terminal has nothing to animate.
#[derive(Debug, Default)]
pub struct TerminalNotices;

impl NotificationSurface for TerminalNotices {
    fn append(&self, _id: NotificationId, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!("{message}"),
            Severity::Success | Severity::Info => tracing::info!("{message}"),
        }
    }

    fn hide(&self, _id: NotificationId) -> HideTransition {
        HideTransition::Instant
    }

    fn remove(&self, _id: NotificationId) {}
}
