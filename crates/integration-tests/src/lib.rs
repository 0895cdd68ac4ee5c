//! Integration tests for the Babyshoe storefront.
//!
//! Page controllers run against a `wiremock` server standing in for the
//! storefront API, with the real [`SessionClient`] in between. Views record
//! what they were asked to display.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p babyshoe-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use babyshoe_storefront::auth::{AuthFormView, FormLayout, InlineMessage, ResetFormView};
use babyshoe_storefront::browser::{HeadlessNavigator, MemoryStorage};
use babyshoe_storefront::cart::CartStore;
use babyshoe_storefront::config::StorefrontConfig;
use babyshoe_storefront::nav::NavView;
use babyshoe_storefront::notify::{
    HideTransition, NotificationCenter, NotificationId, NotificationSurface, Severity,
};
use babyshoe_storefront::session::SessionClient;
use url::Url;
use wiremock::MockServer;

/// Where the static pages are served in tests.
pub const FRONTEND_URL: &str = "https://shop.example.com/Frontend-babyshoe/";

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock API plus everything a page needs to talk to it.
pub struct TestContext {
    pub server: MockServer,
    pub config: StorefrontConfig,
    pub api: Arc<SessionClient>,
    pub cart: CartStore,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let mut config = StorefrontConfig::new(
            Url::parse(&server.uri()).unwrap(),
            Url::parse(FRONTEND_URL).unwrap(),
        );
        config.request_timeout = Duration::from_secs(2);
        let api = Arc::new(SessionClient::new(&config).unwrap());
        let cart = CartStore::new(Arc::new(MemoryStorage::new()));

        Self {
            server,
            config,
            api,
            cart,
        }
    }

    /// A page URL under the frontend directory, e.g. `index.html?x=1`.
    #[must_use]
    pub fn page(&self, path: &str) -> Url {
        self.config.site.base().join(path).unwrap()
    }

    /// A navigator opened on `path`.
    #[must_use]
    pub fn navigator(&self, path: &str) -> Arc<HeadlessNavigator> {
        Arc::new(HeadlessNavigator::new(self.page(path)))
    }
}

/// Records the inline message and layout of either authentication form.
#[derive(Debug, Default)]
pub struct RecordingForm {
    layout: Mutex<Option<FormLayout>>,
    message: Mutex<Option<InlineMessage>>,
    submit_enabled: Mutex<Option<bool>>,
}

impl RecordingForm {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn layout(&self) -> Option<FormLayout> {
        *lock(&self.layout)
    }

    #[must_use]
    pub fn message(&self) -> Option<InlineMessage> {
        lock(&self.message).clone()
    }

    #[must_use]
    pub fn submit_enabled(&self) -> Option<bool> {
        *lock(&self.submit_enabled)
    }
}

impl AuthFormView for RecordingForm {
    fn render(&self, layout: &FormLayout) {
        *lock(&self.layout) = Some(*layout);
    }

    fn show_message(&self, message: &InlineMessage) {
        *lock(&self.message) = Some(message.clone());
    }

    fn clear_message(&self) {
        *lock(&self.message) = None;
    }

    fn reset_fields(&self) {}
}

impl ResetFormView for RecordingForm {
    fn show_message(&self, message: &InlineMessage) {
        *lock(&self.message) = Some(message.clone());
    }

    fn clear_message(&self) {
        *lock(&self.message) = None;
    }

    fn set_submit_enabled(&self, enabled: bool) {
        *lock(&self.submit_enabled) = Some(enabled);
    }
}

/// Records the header.
#[derive(Debug, Default)]
pub struct RecordingNav {
    logged_in: Mutex<Option<bool>>,
    badge: Mutex<Option<u32>>,
}

impl RecordingNav {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn logged_in(&self) -> Option<bool> {
        *lock(&self.logged_in)
    }

    #[must_use]
    pub fn badge(&self) -> Option<u32> {
        *lock(&self.badge)
    }
}

impl NavView for RecordingNav {
    fn show_session_controls(&self, logged_in: bool) {
        *lock(&self.logged_in) = Some(logged_in);
    }

    fn set_cart_badge(&self, count: Option<u32>) {
        *lock(&self.badge) = count;
    }
}

/// Records every notification; hides instantly.
#[derive(Debug, Default)]
pub struct RecordingNotices {
    shown: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotices {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn shown(&self) -> Vec<(String, Severity)> {
        lock(&self.shown).clone()
    }

    /// A center dismissing after the usual delay.
    #[must_use]
    pub fn center(self: &Arc<Self>) -> NotificationCenter {
        NotificationCenter::new(self.clone(), Duration::from_secs(3))
    }
}

impl NotificationSurface for RecordingNotices {
    fn append(&self, _id: NotificationId, message: &str, severity: Severity) {
        lock(&self.shown).push((message.to_string(), severity));
    }

    fn hide(&self, _id: NotificationId) -> HideTransition {
        HideTransition::Instant
    }

    fn remove(&self, _id: NotificationId) {}
}
