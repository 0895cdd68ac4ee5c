//! Error types shared by the page controllers.
//!
//! Four kinds of failure reach the user, none of them fatal to the page:
//!
//! - validation errors, caught locally before any request is sent
//! - rejections, where the server answered with a non-2xx status
//! - connectivity errors, where no response was obtained at all
//! - missing preconditions, such as a reset link without a token

use thiserror::Error;

/// Fallback shown when a rejection carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// Shown when no response was obtained from the API.
pub const CONNECTION_ERROR_MESSAGE: &str = "Could not connect to the server.";

/// Errors returned by the session API.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server answered with a non-success status.
    #[error("Rejected by server ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the `error` field of the body, or the generic fallback.
        message: String,
    },

    /// No response was obtained (DNS, refused connection, timeout).
    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// A success response could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The request URL could not be built from the configured base.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SessionError {
    /// Build a rejection, substituting the generic message for a missing or blank one.
    #[must_use]
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        Self::Rejected { status, message }
    }

    /// Returns `true` if no response was obtained.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Text suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Connection(_) => CONNECTION_ERROR_MESSAGE,
            Self::Decode(_) | Self::InvalidUrl(_) => GENERIC_ERROR_MESSAGE,
        }
    }
}

/// Client-side validation failures. The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort { min: usize },

    #[error("Password must contain an uppercase letter, a lowercase letter, and a number.")]
    PasswordTooWeak,

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Outcome of a failed form submission.
#[derive(Debug, Error)]
pub enum FormError {
    /// Blocked locally; no request was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The request was sent and failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The reset link carried no token; the user must request a new link.
    #[error("No reset token found. Please request a new link.")]
    MissingToken,

    /// The submit control is disabled; the submission was ignored.
    #[error("Submission already in progress.")]
    SubmitDisabled,
}

impl FormError {
    /// Text suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Session(err) => err.user_message().to_string(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if the request never left the client.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        !matches!(self, Self::Session(_))
    }
}
