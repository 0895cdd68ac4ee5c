//! Slide-out side menu.

use std::sync::Arc;

pub trait MenuView: Send + Sync {
    fn set_open(&self, open: bool);
}

pub struct SideMenu {
    view: Arc<dyn MenuView>,
    open: bool,
}

impl SideMenu {
    /// Create a closed menu.
    #[must_use]
    pub fn new(view: Arc<dyn MenuView>) -> Self {
        Self { view, open: false }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger clicked.
    pub fn open(&mut self) {
        self.set_open(true);
    }

    /// Close button clicked.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// A link inside the menu was followed.
    pub fn link_clicked(&mut self) {
        self.close();
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
        self.view.set_open(open);
    }
}
