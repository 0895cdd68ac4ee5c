//! Controller for the reset-password page.
//!
//! The page is reached from an emailed link carrying a `token` query
//! parameter. The token is read at submit time, after the password checks,
//! so a bad password is reported before a missing token.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use babyshoe_core::ResetToken;
use futures::future::BoxFuture;
use secrecy::SecretString;

use super::InlineMessage;
use crate::browser::{Navigator, query_param};
use crate::config::{SiteLinks, Timings};
use crate::error::{FormError, SessionError};
use crate::events::{EventSender, PageHandler};
use crate::session::SessionApi;
use crate::timer::ScheduledTask;
use crate::validation;

const TOKEN_PARAM: &str = "token";
const RESET_SUCCESS_MESSAGE: &str = "Password reset successfully! Redirecting to login...";

/// The reset form as seen by the controller.
pub trait ResetFormView: Send + Sync {
    fn show_message(&self, message: &InlineMessage);
    fn clear_message(&self);
    fn set_submit_enabled(&self, enabled: bool);
}

/// New password and its confirmation.
#[derive(Debug, Clone)]
pub struct ResetFormInput {
    pub password: SecretString,
    pub confirmation: SecretString,
}

impl ResetFormInput {
    #[must_use]
    pub fn new(password: impl Into<String>, confirmation: impl Into<String>) -> Self {
        Self {
            password: SecretString::from(password.into()),
            confirmation: SecretString::from(confirmation.into()),
        }
    }
}

/// A reset request that has been validated but not sent.
#[must_use = "a pending reset does nothing until run"]
pub struct PendingReset {
    request: BoxFuture<'static, Result<(), SessionError>>,
}

impl PendingReset {
    /// Send the request.
    pub async fn run(self) -> Result<(), SessionError> {
        self.request.await
    }
}

/// Events on the reset-password page.
#[derive(Debug)]
pub enum ResetFormEvent {
    Submitted(ResetFormInput),
    Completed(Result<(), SessionError>),
}

/// Drives the reset-password form.
pub struct ResetFormController {
    api: Arc<dyn SessionApi>,
    view: Arc<dyn ResetFormView>,
    navigator: Arc<dyn Navigator>,
    site: SiteLinks,
    redirect_delay: Duration,
    submit_enabled: bool,
    redirect: Option<ScheduledTask>,
}

impl ResetFormController {
    #[must_use]
    pub fn new(
        api: Arc<dyn SessionApi>,
        view: Arc<dyn ResetFormView>,
        navigator: Arc<dyn Navigator>,
        site: SiteLinks,
        timings: &Timings,
    ) -> Self {
        Self {
            api,
            view,
            navigator,
            site,
            redirect_delay: timings.reset_redirect,
            submit_enabled: true,
            redirect: None,
        }
    }

    /// Whether the submit control accepts clicks.
    #[must_use]
    pub const fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Returns `true` while the redirect to the login page is waiting to fire.
    #[must_use]
    pub fn redirect_pending(&self) -> bool {
        self.redirect.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
        self.view.set_submit_enabled(enabled);
    }

    fn fail(&self, err: FormError) -> FormError {
        self.view
            .show_message(&InlineMessage::error(err.user_message()));
        err
    }

    /// Run the local checks, read the token and prepare the request.
    ///
    /// Disables the submit control until [`Self::finish_submit`] is called.
    ///
    /// # Errors
    ///
    /// `SubmitDisabled` while a request is in flight or after success (nothing
    /// is rendered), otherwise `Invalid` or `MissingToken`, shown on the form.
    pub fn begin_submit(&mut self, input: ResetFormInput) -> Result<PendingReset, FormError> {
        if !self.submit_enabled {
            return Err(FormError::SubmitDisabled);
        }
        self.view.clear_message();

        validation::reset_password(&input.password, &input.confirmation)
            .map_err(|e| self.fail(e.into()))?;

        let token = query_param(&self.navigator.current_url(), TOKEN_PARAM)
            .and_then(ResetToken::new)
            .ok_or_else(|| self.fail(FormError::MissingToken))?;

        self.set_submit_enabled(false);

        let api = Arc::clone(&self.api);
        let password = input.password;
        Ok(PendingReset {
            request: Box::pin(async move { api.reset_password(&token, &password).await }),
        })
    }

    /// Render the result of a reset request.
    ///
    /// On success the control stays disabled and the login page loads after
    /// the configured delay.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Session` if the request failed; the control is
    /// re-enabled so the user can try again.
    pub fn finish_submit(&mut self, result: Result<(), SessionError>) -> Result<(), FormError> {
        if let Err(e) = result {
            tracing::warn!(error = %e, "Password reset failed");
            self.set_submit_enabled(true);
            return Err(self.fail(e.into()));
        }

        tracing::info!("Password reset succeeded");
        self.view
            .show_message(&InlineMessage::success(RESET_SUCCESS_MESSAGE));
        let navigator = Arc::clone(&self.navigator);
        let target = self.site.login();
        self.redirect = Some(ScheduledTask::after(self.redirect_delay, move || {
            navigator.navigate(&target);
        }));
        Ok(())
    }

    /// Validate, send and render in one go.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_submit`] and [`Self::finish_submit`].
    pub async fn submit(&mut self, input: ResetFormInput) -> Result<(), FormError> {
        let pending = self.begin_submit(input)?;
        let result = pending.run().await;
        self.finish_submit(result)
    }
}

#[async_trait]
impl PageHandler for ResetFormController {
    type Event = ResetFormEvent;

    async fn handle(&mut self, event: ResetFormEvent, events: &EventSender<ResetFormEvent>) {
        match event {
            ResetFormEvent::Submitted(input) => match self.begin_submit(input) {
                Ok(pending) => {
                    let events = events.clone();
                    tokio::spawn(async move {
                        events.dispatch(ResetFormEvent::Completed(pending.run().await));
                    });
                }
                Err(FormError::SubmitDisabled) => {
                    tracing::debug!("Ignoring reset submit while disabled");
                }
                Err(_) => {}
            },
            ResetFormEvent::Completed(result) => {
                let _ = self.finish_submit(result);
            }
        }
    }
}
