//! Page location and navigation.

use std::sync::{Mutex, PoisonError};

use url::Url;

/// Access to the current page URL and to page changes.
pub trait Navigator: Send + Sync {
    /// The URL of the page currently displayed.
    fn current_url(&self) -> Url;

    /// Load another page.
    fn navigate(&self, url: &Url);

    /// Rewrite the address shown for the current page without reloading it.
    fn replace_url(&self, url: &Url);
}

/// Read a query parameter from a URL. Returns the first value if repeated.
#[must_use]
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Return a copy of `url` with every occurrence of one query parameter removed.
///
/// Other parameters keep their order. An emptied query is dropped entirely,
/// so `index.html?login_success=true` becomes `index.html`.
#[must_use]
pub fn without_query_param(url: &Url, name: &str) -> Url {
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    if remaining.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.query_pairs_mut().clear().extend_pairs(remaining);
    }
    cleaned
}

/// Navigator that only records where the page is.
///
/// Used when driving the storefront without a browser (CLI, tests). It keeps
/// the current URL and a history of every change.
#[derive(Debug)]
pub struct HeadlessNavigator {
    inner: Mutex<HeadlessState>,
}

#[derive(Debug)]
struct HeadlessState {
    current: Url,
    navigations: Vec<Url>,
    replacements: Vec<Url>,
}

impl HeadlessNavigator {
    /// Start on the given page.
    #[must_use]
    pub const fn new(start: Url) -> Self {
        Self {
            inner: Mutex::new(HeadlessState {
                current: start,
                navigations: Vec::new(),
                replacements: Vec::new(),
            }),
        }
    }

    /// Every URL passed to [`Navigator::navigate`], oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<Url> {
        self.lock().navigations.clone()
    }

    /// Every URL passed to [`Navigator::replace_url`], oldest first.
    #[must_use]
    pub fn replacements(&self) -> Vec<Url> {
        self.lock().replacements.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HeadlessState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for HeadlessNavigator {
    fn current_url(&self) -> Url {
        self.lock().current.clone()
    }

    fn navigate(&self, url: &Url) {
        tracing::info!(%url, "Navigating");
        let mut state = self.lock();
        state.current = url.clone();
        state.navigations.push(url.clone());
    }

    fn replace_url(&self, url: &Url) {
        tracing::debug!(%url, "Replacing current URL");
        let mut state = self.lock();
        state.current = url.clone();
        state.replacements.push(url.clone());
    }
}
