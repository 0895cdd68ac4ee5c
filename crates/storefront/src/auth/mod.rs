//! Authentication pages.
//!
//! - [`form`] drives the shared login / signup / forgot-password form
//! - [`reset`] drives the separate reset-password page
//!
//! Both report results inline on the form (see [`InlineMessage`]) rather than
//! through notifications.

pub mod form;
mod mode;
pub mod reset;

pub use form::{AuthFormController, AuthFormEvent, AuthFormInput, AuthFormView, SubmitSuccess};
pub use mode::{FormLayout, FormMode};
pub use reset::{ResetFormController, ResetFormEvent, ResetFormInput, ResetFormView};

/// Colour of an inline form message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Rendered green.
    Success,
    /// Rendered red.
    Error,
}

/// A message rendered under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMessage {
    pub tone: Tone,
    pub text: String,
}

impl InlineMessage {
    /// A green message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    /// A red message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }
}
