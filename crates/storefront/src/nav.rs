//! Header navigation: session controls, cart badge and the welcome notice.
//!
//! Session state is re-derived from the server on every load and nothing
//! about it is stored client-side. A failed status check shows the
//! logged-out controls (fail-open).

use std::sync::Arc;

use babyshoe_core::SessionState;
use futures::future::BoxFuture;

use crate::browser::{Navigator, query_param, without_query_param};
use crate::cart::CartStore;
use crate::config::SiteLinks;
use crate::error::SessionError;
use crate::notify::{NotificationCenter, NotificationId};
use crate::session::SessionApi;

const LOGOUT_FAILED_MESSAGE: &str = "Logout failed. Please try again.";

/// The header as seen by the presenter.
pub trait NavView: Send + Sync {
    /// Show the logout control when `logged_in`, otherwise the login control.
    fn show_session_controls(&self, logged_in: bool);

    /// Show the badge with a count, or hide it.
    fn set_cart_badge(&self, count: Option<u32>);
}

/// Drives the header on storefront pages.
pub struct NavPresenter {
    api: Arc<dyn SessionApi>,
    view: Arc<dyn NavView>,
    navigator: Arc<dyn Navigator>,
    notifications: NotificationCenter,
    cart: CartStore,
    site: SiteLinks,
    state: SessionState,
}

impl NavPresenter {
    #[must_use]
    pub fn new(
        api: Arc<dyn SessionApi>,
        view: Arc<dyn NavView>,
        navigator: Arc<dyn Navigator>,
        notifications: NotificationCenter,
        cart: CartStore,
        site: SiteLinks,
    ) -> Self {
        Self {
            api,
            view,
            navigator,
            notifications,
            cart,
            site,
            state: SessionState::LoggedOut,
        }
    }

    /// Session state from the last status check.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Fetch the session state and render the header.
    pub async fn load(&mut self) -> &SessionState {
        let status = self.api.status().await;
        self.apply_status(status);
        &self.state
    }

    /// The status request, for callers that run it off the page loop.
    #[must_use]
    pub fn status_request(&self) -> BoxFuture<'static, Result<SessionState, SessionError>> {
        let api = Arc::clone(&self.api);
        Box::pin(async move { api.status().await })
    }

    /// Render the header from a status result, then greet a fresh login.
    pub fn apply_status(&mut self, status: Result<SessionState, SessionError>) {
        self.state = status.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not fetch authentication status");
            SessionState::LoggedOut
        });
        tracing::debug!(logged_in = self.state.is_logged_in(), "Auth status applied");

        self.view.show_session_controls(self.state.is_logged_in());
        self.refresh_cart_badge();
        self.welcome();
    }

    /// Re-read the cart and update the badge.
    pub fn refresh_cart_badge(&self) {
        let count = if self.state.is_logged_in() {
            Some(self.cart.total_quantity()).filter(|&count| count > 0)
        } else {
            None
        };
        self.view.set_cart_badge(count);
    }

    /// Greet the user if the page was reached right after a login.
    ///
    /// The login marker is stripped from the address afterwards so a reload
    /// does not greet again.
    pub fn welcome(&self) -> Option<NotificationId> {
        if !self.state.is_logged_in() {
            return None;
        }
        let current = self.navigator.current_url();
        query_param(&current, SiteLinks::LOGIN_SUCCESS_PARAM)?;

        let message = self.state.display_name().map_or_else(
            || "Welcome back!".to_string(),
            |name| format!("Welcome back, {name}!"),
        );
        let id = self.notifications.success(&message);

        let cleaned = without_query_param(&current, SiteLinks::LOGIN_SUCCESS_PARAM);
        self.navigator.replace_url(&cleaned);
        Some(id)
    }

    /// The logout request, for callers that run it off the page loop.
    #[must_use]
    pub fn logout_request(&self) -> BoxFuture<'static, Result<(), SessionError>> {
        let api = Arc::clone(&self.api);
        Box::pin(async move { api.logout().await })
    }

    /// React to a finished logout request.
    ///
    /// Any server response leads to the landing page, including a rejection.
    /// Only a request that got no response keeps the user on the page.
    ///
    /// # Errors
    ///
    /// Returns the error when no response was obtained; an error notification
    /// has been shown.
    pub fn finish_logout(&mut self, result: Result<(), SessionError>) -> Result<(), SessionError> {
        match result {
            Ok(()) => tracing::info!("Logged out"),
            Err(e @ (SessionError::Rejected { .. } | SessionError::Decode(_))) => {
                tracing::warn!(error = %e, "Logout rejected by server, leaving anyway");
            }
            Err(e) => {
                tracing::error!(error = %e, "Logout failed");
                self.notifications.error(LOGOUT_FAILED_MESSAGE);
                return Err(e);
            }
        }

        self.state = SessionState::LoggedOut;
        self.navigator.navigate(&self.site.landing());
        Ok(())
    }

    /// End the session and leave for the landing page.
    ///
    /// # Errors
    ///
    /// See [`Self::finish_logout`].
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        let result = self.api.logout().await;
        self.finish_logout(result)
    }
}
