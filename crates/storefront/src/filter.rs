//! Homepage product filtering by shoe size.
//!
//! Products carry a details line such as `Sizes: 38–44 · $25.00`. The size
//! range is taken from the first two integers in that line.

use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;

static INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Static pattern, verified by tests
    Regex::new(r"\d+").unwrap()
});

/// Inclusive range of sizes a product is available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    /// Read the range from a product details line.
    ///
    /// Returns `None` when the line holds fewer than two integers.
    #[must_use]
    pub fn parse_details(details: &str) -> Option<Self> {
        let normalized = details.replace('\u{2013}', "-");
        let mut numbers = INTEGER
            .find_iter(&normalized)
            .map(|m| m.as_str().parse::<u32>().ok());
        let min = numbers.next()??;
        let max = numbers.next()??;
        Some(Self { min, max })
    }

    #[must_use]
    pub const fn contains(self, size: u32) -> bool {
        self.min <= size && size <= self.max
    }
}

/// Invalid value in a size selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid size selection: {0:?}")]
pub struct InvalidSize(pub String);

/// Value of a size selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeSelection {
    #[default]
    All,
    Size(u32),
}

impl SizeSelection {
    /// Whether a product with the given details line is shown.
    ///
    /// Products whose range cannot be read are hidden for any specific size.
    #[must_use]
    pub fn matches(self, details: &str) -> bool {
        match self {
            Self::All => true,
            Self::Size(size) => SizeRange::parse_details(details).is_some_and(|r| r.contains(size)),
        }
    }
}

impl FromStr for SizeSelection {
    type Err = InvalidSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse()
            .map(Self::Size)
            .map_err(|_| InvalidSize(s.to_string()))
    }
}

pub trait ProductGridView: Send + Sync {
    fn set_product_visible(&self, index: usize, visible: bool);
}

/// One product grid with its own size selector.
pub struct SizeFilter {
    details: Vec<String>,
    view: Arc<dyn ProductGridView>,
}

impl SizeFilter {
    /// `details` holds each product's details line, in grid order.
    #[must_use]
    pub fn new(details: Vec<String>, view: Arc<dyn ProductGridView>) -> Self {
        Self { details, view }
    }

    /// Show or hide every product for a selection. Returns how many are shown.
    pub fn apply(&self, selection: SizeSelection) -> usize {
        let mut shown = 0;
        for (index, details) in self.details.iter().enumerate() {
            let visible = selection.matches(details);
            if visible {
                shown += 1;
            }
            self.view.set_product_visible(index, visible);
        }
        tracing::debug!(?selection, shown, "Size filter applied");
        shown
    }
}
