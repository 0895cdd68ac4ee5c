//! Command implementations and the state they share.
//!
//! A browser keeps the session cookie between page loads; the CLI keeps it
//! in the same storage file as the cart, under [`SESSION_COOKIE_KEY`].

pub mod cart;
pub mod session;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use babyshoe_storefront::browser::{FileStorage, HeadlessNavigator, Storage, StorageError};
use babyshoe_storefront::cart::CartStore;
use babyshoe_storefront::config::{ConfigError, StorefrontConfig};
use babyshoe_storefront::error::{FormError, SessionError};
use babyshoe_storefront::notify::NotificationCenter;
use babyshoe_storefront::session::SessionClient;
use reqwest::cookie::{CookieStore, Jar};
use thiserror::Error;
use url::Url;

use crate::terminal::TerminalNotices;

/// Storage key holding the session cookie header.
pub const SESSION_COOKIE_KEY: &str = "babyshoe_session";

/// Cookies are scoped to the API routes.
const COOKIE_SCOPE_PATH: &str = "/api/";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{}", .0.user_message())]
    Form(#[from] FormError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),

    #[error("Invalid link {link}: {reason}")]
    InvalidLink { link: String, reason: String },
}

/// Configuration, storage and API client for one invocation.
pub struct Context {
    pub config: StorefrontConfig,
    pub storage: Arc<FileStorage>,
    pub api: Arc<SessionClient>,
    jar: Arc<Jar>,
    session_ended: AtomicBool,
}

impl Context {
    /// Open storage and restore the saved session cookie.
    ///
    /// An unreadable storage file is logged and the command runs without a
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, CommandError> {
        let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
        let jar = Arc::new(Jar::default());

        let scope = config.api_url(COOKIE_SCOPE_PATH)?;
        match storage.get_item(SESSION_COOKIE_KEY) {
            Ok(Some(saved)) => {
                for cookie in saved.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                    jar.add_cookie_str(cookie, &scope);
                }
                tracing::debug!(path = %storage.path().display(), "Restored session cookie");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved session, continuing without it");
            }
        }

        let api = Arc::new(SessionClient::with_cookie_jar(
            &config,
            Arc::clone(&jar),
        )?);

        Ok(Self {
            config,
            storage,
            api,
            jar,
            session_ended: AtomicBool::new(false),
        })
    }

    /// Cart backed by the storage file.
    #[must_use]
    pub fn cart(&self) -> CartStore {
        CartStore::new(Arc::clone(&self.storage) as Arc<dyn Storage>)
    }

    /// Notifications printed to the terminal.
    #[must_use]
    pub fn notifications(&self) -> NotificationCenter {
        NotificationCenter::new(
            Arc::new(TerminalNotices),
            self.config.timings.notification_dismiss,
        )
    }

    /// A navigator starting on `page`.
    #[must_use]
    pub fn navigator(page: Url) -> Arc<HeadlessNavigator> {
        Arc::new(HeadlessNavigator::new(page))
    }

    /// Forget the session cookie when this invocation finishes.
    pub fn end_session(&self) {
        self.session_ended.store(true, Ordering::SeqCst);
    }

    /// Write the current session cookie back to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    pub fn save_session(&self) -> Result<(), CommandError> {
        let scope = self.config.api_url(COOKIE_SCOPE_PATH)?;
        let cookies = if self.session_ended.load(Ordering::SeqCst) {
            None
        } else {
            self.jar
                .cookies(&scope)
                .and_then(|value| value.to_str().ok().map(str::to_string))
        };

        match cookies {
            Some(cookies) => self.storage.set_item(SESSION_COOKIE_KEY, &cookies)?,
            None => self.storage.remove_item(SESSION_COOKIE_KEY)?,
        }
        Ok(())
    }
}
