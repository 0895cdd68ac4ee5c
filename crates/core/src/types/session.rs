//! Session state as reported by the storefront API.
//!
//! The server answers `GET /api/auth/status` with `{isLoggedIn, user?}`. That
//! wire shape is decoded into [`AuthStatus`] and immediately converted into a
//! [`SessionState`], which cannot represent a user without a session.

use serde::{Deserialize, Serialize};

/// The user attached to a live session.
///
/// Only `name` is used by the storefront; unknown fields sent by the server
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Display name chosen at registration.
    #[serde(default)]
    pub name: Option<String>,
    /// Account email, when the server includes it.
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionUser {
    /// Create a user with only a display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    /// The display name, if it is present and not blank.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Whether the current browser has a session, and as whom.
///
/// Never persisted client-side: it is re-derived from the server on every
/// page load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No session (also the fallback when the status check fails).
    #[default]
    LoggedOut,
    /// A session exists. The server may omit the user record.
    LoggedIn {
        /// The logged-in user, when provided.
        user: Option<SessionUser>,
    },
}

impl SessionState {
    /// Returns `true` if a session exists.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::LoggedIn { user } => user.as_ref(),
            Self::LoggedOut => None,
        }
    }

    /// The logged-in user's display name, if known.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.user().and_then(SessionUser::display_name)
    }
}

/// Wire shape of the auth status response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    /// Whether the server recognises the session cookie.
    #[serde(default)]
    pub is_logged_in: bool,
    /// The user record, expected only when logged in.
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl From<AuthStatus> for SessionState {
    fn from(status: AuthStatus) -> Self {
        if status.is_logged_in {
            Self::LoggedIn { user: status.user }
        } else {
            Self::LoggedOut
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_in_with_user() {
        let status: AuthStatus =
            serde_json::from_str(r#"{"isLoggedIn":true,"user":{"name":"Ada","id":7}}"#).unwrap();
        let state = SessionState::from(status);

        assert!(state.is_logged_in());
        assert_eq!(state.display_name(), Some("Ada"));
    }

    #[test]
    fn test_user_dropped_when_logged_out() {
        let status: AuthStatus =
            serde_json::from_str(r#"{"isLoggedIn":false,"user":{"name":"Ada"}}"#).unwrap();
        let state = SessionState::from(status);

        assert_eq!(state, SessionState::LoggedOut);
        assert!(state.user().is_none());
    }

    #[test]
    fn test_missing_fields_default_to_logged_out() {
        let status: AuthStatus = serde_json::from_str("{}").unwrap();
        assert_eq!(SessionState::from(status), SessionState::LoggedOut);
    }

    #[test]
    fn test_blank_name_is_not_a_display_name() {
        let state = SessionState::LoggedIn {
            user: Some(SessionUser::named("   ")),
        };
        assert_eq!(state.display_name(), None);

        let state = SessionState::LoggedIn { user: None };
        assert_eq!(state.display_name(), None);
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let status = AuthStatus {
            is_logged_in: true,
            user: Some(SessionUser::named("Ada")),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["isLoggedIn"], true);
        assert_eq!(json["user"]["name"], "Ada");
    }
}
