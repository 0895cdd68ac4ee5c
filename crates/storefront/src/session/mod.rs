//! Session API client.
//!
//! # Architecture
//!
//! - [`SessionApi`] is the seam the controllers depend on; tests substitute
//!   their own implementation
//! - [`SessionClient`] is the HTTP implementation, one `reqwest` client with a
//!   cookie store so the session cookie rides along on every call
//! - The server is the only source of truth for whether a user is logged in;
//!   nothing about the session is cached client-side
//!
//! # Endpoints
//!
//! | Method | Path | Body |
//! |---|---|---|
//! | GET | `/api/auth/status` | - |
//! | POST | `/api/login` | `{email, password}` |
//! | POST | `/api/register` | `{name, email, password}` |
//! | POST | `/api/forgot-password` | `{email}` |
//! | POST | `/api/reset-password` | `{token, password}` |
//! | POST | `/api/logout` | - |

mod client;
mod types;

pub use client::SessionClient;

use async_trait::async_trait;
use babyshoe_core::{Email, ResetToken, SessionState};
use secrecy::SecretString;

use crate::error::SessionError;

/// Operations on the server-side session.
///
/// Every mutating call resolves to `Ok(())` on any 2xx response.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Ask the server whether the current browser has a session.
    ///
    /// Callers decide what a failure means; the storefront treats it as
    /// logged out.
    async fn status(&self) -> Result<SessionState, SessionError>;

    /// Start a session with email and password.
    async fn login(&self, email: &Email, password: &SecretString) -> Result<(), SessionError>;

    /// Create an account.
    async fn register(
        &self,
        name: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<(), SessionError>;

    /// Ask for a reset link to be mailed.
    ///
    /// The server answers the same way whether or not the account exists.
    async fn request_password_reset(&self, email: &Email) -> Result<(), SessionError>;

    /// Set a new password using the token from a reset link.
    async fn reset_password(
        &self,
        token: &ResetToken,
        password: &SecretString,
    ) -> Result<(), SessionError>;

    /// End the session.
    async fn logout(&self) -> Result<(), SessionError>;
}
