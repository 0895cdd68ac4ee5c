//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BABYSHOE_API_BASE_URL` - Base URL of the storefront API (e.g., `https://api.example.com`)
//! - `BABYSHOE_FRONTEND_URL` - URL of the directory serving the static pages
//!   (e.g., `https://shop.example.com/Frontend-babyshoe/`)
//!
//! ## Optional
//! - `BABYSHOE_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `BABYSHOE_CART_PATH` - File backing local storage for headless use
//!   (default: `.babyshoe/storage.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CART_PATH: &str = ".babyshoe/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the storefront API
    pub api_base_url: Url,
    /// Static pages served to the browser
    pub site: SiteLinks,
    /// Per-request timeout for API calls
    pub request_timeout: Duration,
    /// File backing local storage for headless use
    pub storage_path: PathBuf,
    /// Fixed UI delays
    pub timings: Timings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Delays and thresholds used by the page controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Delay between a successful login and the redirect to the landing page
    pub login_redirect: Duration,
    /// Delay between a successful password reset and the redirect to login
    pub reset_redirect: Duration,
    /// How long a notification stays visible before it starts hiding
    pub notification_dismiss: Duration,
    /// Slideshow auto-advance period
    pub slideshow_interval: Duration,
    /// Delay before sending an add-to-cart click to the product page
    pub add_to_cart_redirect: Duration,
    /// Viewports at or below this width scroll slides natively
    pub mobile_breakpoint_px: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            login_redirect: Duration::from_millis(1500),
            reset_redirect: Duration::from_secs(3),
            notification_dismiss: Duration::from_secs(3),
            slideshow_interval: Duration::from_secs(4),
            add_to_cart_redirect: Duration::from_millis(1500),
            mobile_breakpoint_px: 768,
        }
    }
}

/// Absolute URLs of the static storefront pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLinks {
    base: Url,
}

impl SiteLinks {
    /// Query marker appended to the landing page after a login.
    pub const LOGIN_SUCCESS_PARAM: &'static str = "login_success";

    /// Build links relative to the directory serving the pages.
    ///
    /// A trailing slash is added when missing so that page names resolve
    /// inside the directory rather than replacing its last segment.
    #[must_use]
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base }
    }

    /// The directory the pages are served from.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// The landing page (`index.html`).
    #[must_use]
    pub fn landing(&self) -> Url {
        self.page("index.html")
    }

    /// The landing page carrying the one-shot login marker.
    #[must_use]
    pub fn landing_after_login(&self) -> Url {
        let mut url = self.landing();
        url.query_pairs_mut()
            .append_pair(Self::LOGIN_SUCCESS_PARAM, "true");
        url
    }

    /// The login / signup page.
    #[must_use]
    pub fn login(&self) -> Url {
        self.page("login.html")
    }

    /// The cart page.
    #[must_use]
    pub fn cart(&self) -> Url {
        self.page("cart.html")
    }

    /// The detail page for one product.
    #[must_use]
    pub fn product(&self, id: &str) -> Url {
        let mut url = self.page("product.html");
        url.query_pairs_mut().append_pair("id", id);
        url
    }

    fn page(&self, name: &str) -> Url {
        // Joining a bare file name onto a directory URL cannot fail.
        self.base.join(name).unwrap_or_else(|_| self.base.clone())
    }
}

impl StorefrontConfig {
    /// Create a configuration with default timeouts and timings.
    #[must_use]
    pub fn new(api_base_url: Url, frontend_url: Url) -> Self {
        Self {
            api_base_url,
            site: SiteLinks::new(frontend_url),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            storage_path: PathBuf::from(DEFAULT_CART_PATH),
            timings: Timings::default(),
            sentry_dsn: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_url("BABYSHOE_API_BASE_URL")?;
        let frontend_url = get_required_url("BABYSHOE_FRONTEND_URL")?;
        let timeout_secs = get_env_or_default(
            "BABYSHOE_REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("BABYSHOE_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "BABYSHOE_REQUEST_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let storage_path = PathBuf::from(get_env_or_default("BABYSHOE_CART_PATH", DEFAULT_CART_PATH));
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            api_base_url,
            site: SiteLinks::new(frontend_url),
            request_timeout: Duration::from_secs(timeout_secs),
            storage_path,
            timings: Timings::default(),
            sentry_dsn,
        })
    }

    /// Append an API path (e.g., `/api/login`) to the API base URL.
    ///
    /// The path is appended rather than resolved, so a base with its own
    /// path prefix (`https://host/v1`) keeps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined string is not a valid URL.
    pub fn api_url(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.api_base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable and parse it as an absolute URL.
fn get_required_url(key: &str) -> Result<Url, ConfigError> {
    let value = get_required_env(key)?;
    parse_url(key, &value)
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an http(s) URL".to_string(),
        ));
    }
    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
