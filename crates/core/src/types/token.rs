//! Password reset token carried in the reset page URL.

use core::fmt;

use serde::Serialize;

/// An opaque password reset token.
///
/// The token comes from the `token` query parameter of the reset link. Its
/// expiry is tracked by the server only. An empty value is treated the same
/// as a missing one.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResetToken(String);

impl ResetToken {
    /// Wrap a raw token, returning `None` if it is empty.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResetToken([REDACTED])")
    }
}
