//! In-memory doubles shared by controller tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use babyshoe_core::{Email, ResetToken, SessionState, SessionUser};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::auth::{AuthFormView, FormLayout, InlineMessage, ResetFormView};
use crate::config::SiteLinks;
use crate::error::SessionError;
use crate::session::SessionApi;

pub fn site() -> SiteLinks {
    SiteLinks::new(Url::parse("https://shop.example.com/").unwrap())
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A request seen by [`FakeSessionApi`], passwords exposed for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status,
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    ForgotPassword { email: String },
    ResetPassword { token: String, password: String },
    Logout,
}

/// How the fake answers.
#[derive(Debug, Clone)]
pub enum Scripted {
    Ok,
    LoggedIn(Option<SessionUser>),
    Reject(u16, Option<String>),
    Unreachable,
}

impl Scripted {
    fn into_result(self) -> Result<(), SessionError> {
        match self {
            Self::Ok | Self::LoggedIn(_) => Ok(()),
            Self::Reject(status, message) => Err(SessionError::rejected(status, message)),
            Self::Unreachable => Err(connection_error()),
        }
    }
}

/// A connectivity failure without touching the network.
pub fn connection_error() -> SessionError {
    let err = reqwest::Client::new().get("not a url").build().unwrap_err();
    SessionError::Connection(err)
}

#[derive(Debug)]
pub struct FakeSessionApi {
    calls: Mutex<Vec<Call>>,
    status: Mutex<Scripted>,
    outcome: Mutex<Scripted>,
    delay: Mutex<Duration>,
}

impl FakeSessionApi {
    /// Logged out, every mutation succeeds immediately.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            status: Mutex::new(Scripted::Ok),
            outcome: Mutex::new(Scripted::Ok),
            delay: Mutex::new(Duration::ZERO),
        })
    }

    /// Answer for `status`; `Ok` means logged out.
    pub fn set_status(&self, status: Scripted) {
        *lock(&self.status) = status;
    }

    /// Answer for every mutating call.
    pub fn script(&self, outcome: Scripted) {
        *lock(&self.outcome) = outcome;
    }

    /// Delay every answer.
    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.delay) = delay;
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls)
            .iter()
            .filter(|call| **call != Call::Status)
            .cloned()
            .collect()
    }

    async fn record(&self, call: Call) -> Result<(), SessionError> {
        lock(&self.calls).push(call);
        let delay = *lock(&self.delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        lock(&self.outcome).clone().into_result()
    }
}

#[async_trait]
impl SessionApi for FakeSessionApi {
    async fn status(&self) -> Result<SessionState, SessionError> {
        lock(&self.calls).push(Call::Status);
        match lock(&self.status).clone() {
            Scripted::LoggedIn(user) => Ok(SessionState::LoggedIn { user }),
            other => other.into_result().map(|()| SessionState::LoggedOut),
        }
    }

    async fn login(&self, email: &Email, password: &SecretString) -> Result<(), SessionError> {
        self.record(Call::Login {
            email: email.to_string(),
            password: password.expose_secret().to_string(),
        })
        .await
    }

    async fn register(
        &self,
        name: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<(), SessionError> {
        self.record(Call::Register {
            name: name.to_string(),
            email: email.to_string(),
            password: password.expose_secret().to_string(),
        })
        .await
    }

    async fn request_password_reset(&self, email: &Email) -> Result<(), SessionError> {
        self.record(Call::ForgotPassword {
            email: email.to_string(),
        })
        .await
    }

    async fn reset_password(
        &self,
        token: &ResetToken,
        password: &SecretString,
    ) -> Result<(), SessionError> {
        self.record(Call::ResetPassword {
            token: token.as_str().to_string(),
            password: password.expose_secret().to_string(),
        })
        .await
    }

    async fn logout(&self) -> Result<(), SessionError> {
        self.record(Call::Logout).await
    }
}

#[derive(Debug, Default)]
struct FormState {
    layout: Option<FormLayout>,
    message: Option<InlineMessage>,
    resets: usize,
    submit_enabled: Option<bool>,
}

/// Records what a form would display. Serves both authentication pages.
#[derive(Debug, Default)]
pub struct RecordingFormView {
    state: Mutex<FormState>,
}

impl RecordingFormView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn layout(&self) -> Option<FormLayout> {
        lock(&self.state).layout
    }

    pub fn message(&self) -> Option<InlineMessage> {
        lock(&self.state).message.clone()
    }

    pub fn resets(&self) -> usize {
        lock(&self.state).resets
    }

    /// Last value passed to `set_submit_enabled`, if any.
    pub fn submit_enabled(&self) -> Option<bool> {
        lock(&self.state).submit_enabled
    }
}

impl AuthFormView for RecordingFormView {
    fn render(&self, layout: &FormLayout) {
        lock(&self.state).layout = Some(*layout);
    }

    fn show_message(&self, message: &InlineMessage) {
        lock(&self.state).message = Some(message.clone());
    }

    fn clear_message(&self) {
        lock(&self.state).message = None;
    }

    fn reset_fields(&self) {
        lock(&self.state).resets += 1;
    }
}

impl ResetFormView for RecordingFormView {
    fn show_message(&self, message: &InlineMessage) {
        lock(&self.state).message = Some(message.clone());
    }

    fn clear_message(&self) {
        lock(&self.state).message = None;
    }

    fn set_submit_enabled(&self, enabled: bool) {
        lock(&self.state).submit_enabled = Some(enabled);
    }
}
