//! Controller for the shared login / signup / forgot-password form.
//!
//! The controller owns the current [`FormMode`] and is the only thing that
//! changes it. A submission is split in two so the page loop stays
//! responsive: [`AuthFormController::begin_submit`] validates and prepares
//! the request, and [`AuthFormController::finish_submit`] renders its result.
//! [`AuthFormController::submit`] chains both for callers that can wait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use babyshoe_core::Email;
use futures::future::BoxFuture;
use secrecy::SecretString;

use super::{FormLayout, FormMode, InlineMessage};
use crate::browser::Navigator;
use crate::config::{SiteLinks, Timings};
use crate::error::{FormError, SessionError, ValidationError};
use crate::events::{EventSender, PageHandler};
use crate::session::SessionApi;
use crate::timer::ScheduledTask;
use crate::validation;

const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";
const SIGNUP_SUCCESS_MESSAGE: &str = "Registration successful! Please login.";
const RESET_LINK_MESSAGE: &str =
    "If an account with that email exists, a reset link has been sent.";

/// The form as seen by the controller.
pub trait AuthFormView: Send + Sync {
    /// Apply a mode's title, labels and field visibility.
    fn render(&self, layout: &FormLayout);

    /// Show a message under the form.
    fn show_message(&self, message: &InlineMessage);

    /// Remove the message under the form.
    fn clear_message(&self);

    /// Empty every input field.
    fn reset_fields(&self);
}

/// Field values at the time of submission.
#[derive(Debug, Clone)]
pub struct AuthFormInput {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl AuthFormInput {
    /// Values for a login or forgot-password submission.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Set the name field (signup only).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// What a successful submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitSuccess {
    /// Logged in; a redirect to the landing page is scheduled.
    LoggedIn,
    /// Account created; the form is back in login mode.
    Registered,
    /// Reset link requested.
    ResetLinkRequested,
}

/// A validated submission whose request has not completed yet.
#[must_use = "a pending submission does nothing until run"]
pub struct PendingSubmit {
    mode: FormMode,
    request: BoxFuture<'static, Result<(), SessionError>>,
}

impl PendingSubmit {
    /// Mode the form was in when submitted.
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Send the request.
    pub async fn run(self) -> CompletedSubmit {
        CompletedSubmit {
            mode: self.mode,
            result: self.request.await,
        }
    }
}

/// A finished request, ready to be rendered by the controller.
#[derive(Debug)]
pub struct CompletedSubmit {
    mode: FormMode,
    result: Result<(), SessionError>,
}

/// Events on the authentication page.
#[derive(Debug)]
pub enum AuthFormEvent {
    /// The page finished loading.
    Loaded,
    /// The switch link (login / signup) was clicked.
    SwitchClicked,
    /// The forgot-password link was clicked.
    ForgotClicked,
    /// The form was submitted.
    Submitted(AuthFormInput),
    /// A submission's request finished.
    Completed(CompletedSubmit),
}

/// Drives the shared authentication form.
pub struct AuthFormController {
    mode: FormMode,
    api: Arc<dyn SessionApi>,
    view: Arc<dyn AuthFormView>,
    navigator: Arc<dyn Navigator>,
    site: SiteLinks,
    redirect_delay: Duration,
    redirect: Option<ScheduledTask>,
}

impl AuthFormController {
    /// Create the controller and render the login layout.
    #[must_use]
    pub fn new(
        api: Arc<dyn SessionApi>,
        view: Arc<dyn AuthFormView>,
        navigator: Arc<dyn Navigator>,
        site: SiteLinks,
        timings: &Timings,
    ) -> Self {
        let controller = Self {
            mode: FormMode::Login,
            api,
            view,
            navigator,
            site,
            redirect_delay: timings.login_redirect,
            redirect: None,
        };
        controller.render();
        controller
    }

    /// The active mode.
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Returns `true` while a post-login redirect is waiting to fire.
    #[must_use]
    pub fn redirect_pending(&self) -> bool {
        self.redirect.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Handle a click on the switch link.
    pub fn click_switch(&mut self) {
        self.set_mode(self.mode.on_switch());
    }

    /// Handle a click on the forgot-password link.
    pub fn click_forgot(&mut self) {
        self.set_mode(self.mode.on_forgot());
    }

    fn set_mode(&mut self, mode: FormMode) {
        tracing::debug!(from = ?self.mode, to = ?mode, "Auth form mode change");
        self.mode = mode;
        self.render();
    }

    fn render(&self) {
        self.view.clear_message();
        self.view.render(&self.mode.layout());
    }

    /// Send a visitor who already has a session to the landing page.
    ///
    /// A failed status check is logged and treated as no session. Returns
    /// `true` if a redirect happened.
    pub async fn redirect_if_logged_in(&self) -> bool {
        match self.api.status().await {
            Ok(state) if state.is_logged_in() => {
                tracing::info!("Already logged in, leaving the login page");
                self.navigator.navigate(&self.site.landing());
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not check auth status on login page load");
                false
            }
        }
    }

    /// Validate the input and prepare the request for the current mode.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Invalid` (already rendered on the form) if a local
    /// check fails; no request is prepared in that case.
    pub fn begin_submit(&mut self, input: AuthFormInput) -> Result<PendingSubmit, FormError> {
        self.view.clear_message();

        let email = match validate(self.mode, &input) {
            Ok(email) => email,
            Err(e) => {
                self.view.show_message(&InlineMessage::error(e.to_string()));
                return Err(e.into());
            }
        };

        let api = Arc::clone(&self.api);
        let AuthFormInput { name, password, .. } = input;
        let request: BoxFuture<'static, Result<(), SessionError>> = match self.mode {
            FormMode::Login => Box::pin(async move { api.login(&email, &password).await }),
            FormMode::Signup => {
                Box::pin(async move { api.register(&name, &email, &password).await })
            }
            FormMode::ForgotPassword => {
                Box::pin(async move { api.request_password_reset(&email).await })
            }
        };

        Ok(PendingSubmit {
            mode: self.mode,
            request,
        })
    }

    /// Render the result of a finished request.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Session` (already rendered on the form) if the
    /// request failed. Mode and field values are left untouched.
    pub fn finish_submit(&mut self, completed: CompletedSubmit) -> Result<SubmitSuccess, FormError> {
        let CompletedSubmit { mode, result } = completed;

        if let Err(e) = result {
            tracing::warn!(?mode, error = %e, "Auth form submission failed");
            self.view
                .show_message(&InlineMessage::error(e.user_message()));
            return Err(e.into());
        }

        match mode {
            FormMode::Login => {
                tracing::info!("Login succeeded");
                self.view
                    .show_message(&InlineMessage::success(LOGIN_SUCCESS_MESSAGE));
                let navigator = Arc::clone(&self.navigator);
                let target = self.site.landing_after_login();
                self.redirect = Some(ScheduledTask::after(self.redirect_delay, move || {
                    navigator.navigate(&target);
                }));
                Ok(SubmitSuccess::LoggedIn)
            }
            FormMode::Signup => {
                tracing::info!("Registration succeeded");
                self.set_mode(FormMode::Login);
                self.view.reset_fields();
                self.view
                    .show_message(&InlineMessage::success(SIGNUP_SUCCESS_MESSAGE));
                Ok(SubmitSuccess::Registered)
            }
            FormMode::ForgotPassword => {
                self.view
                    .show_message(&InlineMessage::success(RESET_LINK_MESSAGE));
                Ok(SubmitSuccess::ResetLinkRequested)
            }
        }
    }

    /// Validate, send and render a submission in one go.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_submit`] and [`Self::finish_submit`].
    pub async fn submit(&mut self, input: AuthFormInput) -> Result<SubmitSuccess, FormError> {
        let pending = self.begin_submit(input)?;
        let completed = pending.run().await;
        self.finish_submit(completed)
    }
}

/// Local checks, in order. Login deliberately has no password minimum.
fn validate(mode: FormMode, input: &AuthFormInput) -> Result<Email, ValidationError> {
    if mode == FormMode::Signup {
        validation::signup_password(&input.password)?;
    }
    validation::email(&input.email)
}

#[async_trait]
impl PageHandler for AuthFormController {
    type Event = AuthFormEvent;

    async fn handle(&mut self, event: AuthFormEvent, events: &EventSender<AuthFormEvent>) {
        match event {
            AuthFormEvent::Loaded => {
                self.redirect_if_logged_in().await;
            }
            AuthFormEvent::SwitchClicked => self.click_switch(),
            AuthFormEvent::ForgotClicked => self.click_forgot(),
            AuthFormEvent::Submitted(input) => {
                if let Ok(pending) = self.begin_submit(input) {
                    let events = events.clone();
                    tokio::spawn(async move {
                        let completed = pending.run().await;
                        events.dispatch(AuthFormEvent::Completed(completed));
                    });
                }
            }
            AuthFormEvent::Completed(completed) => {
                let _ = self.finish_submit(completed);
            }
        }
    }
}
