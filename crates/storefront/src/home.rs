//! The storefront landing page.
//!
//! Composes the header, side menu, slideshow and size filters behind one
//! event loop. Status and logout requests run as spawned tasks and report
//! back through [`HomeEvent::StatusLoaded`] and [`HomeEvent::LogoutFinished`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use babyshoe_core::{ProductId, SessionState};

use crate::browser::Navigator;
use crate::config::{SiteLinks, Timings};
use crate::error::SessionError;
use crate::events::{EventSender, PageHandler};
use crate::filter::{SizeFilter, SizeSelection};
use crate::menu::SideMenu;
use crate::nav::NavPresenter;
use crate::notify::NotificationCenter;
use crate::slideshow::Slideshow;
use crate::timer::ScheduledTask;

const SELECT_SIZE_MESSAGE: &str = "Please select a size on the product page.";

/// Events on the landing page.
#[derive(Debug)]
pub enum HomeEvent {
    Loaded,
    StatusLoaded(Result<SessionState, SessionError>),
    LoginIconClicked,
    CartIconClicked,
    LogoutClicked,
    LogoutFinished(Result<(), SessionError>),
    HamburgerClicked,
    MenuCloseClicked,
    MenuLinkClicked,
    NextSlideClicked,
    PrevSlideClicked,
    SizeSelected { grid: usize, selection: SizeSelection },
    AddToCartClicked(ProductId),
    /// Another tab or command changed the stored cart.
    CartChanged,
}

/// Widgets owned by the landing page.
pub struct HomeWidgets {
    pub nav: NavPresenter,
    pub menu: SideMenu,
    pub slideshow: Slideshow,
    pub filters: Vec<SizeFilter>,
}

pub struct HomePage {
    widgets: HomeWidgets,
    notifications: NotificationCenter,
    navigator: Arc<dyn Navigator>,
    site: SiteLinks,
    product_redirect_delay: Duration,
    product_redirect: Option<ScheduledTask>,
}

impl HomePage {
    #[must_use]
    pub fn new(
        widgets: HomeWidgets,
        notifications: NotificationCenter,
        navigator: Arc<dyn Navigator>,
        site: SiteLinks,
        timings: &Timings,
    ) -> Self {
        Self {
            widgets,
            notifications,
            navigator,
            site,
            product_redirect_delay: timings.add_to_cart_redirect,
            product_redirect: None,
        }
    }

    #[must_use]
    pub const fn nav(&self) -> &NavPresenter {
        &self.widgets.nav
    }

    /// Products can only be added from their own page, where a size is picked.
    ///
    /// Shows a notice and sends the user there after a short delay. A newer
    /// click replaces a redirect that has not fired yet.
    pub fn add_to_cart(&mut self, id: &ProductId) {
        self.notifications.error(SELECT_SIZE_MESSAGE);

        let navigator = Arc::clone(&self.navigator);
        let target = self.site.product(&id.to_string());
        tracing::debug!(%id, "Sending add-to-cart to product page");
        self.product_redirect = Some(ScheduledTask::after(self.product_redirect_delay, move || {
            navigator.navigate(&target);
        }));
    }

    fn apply_size(&self, grid: usize, selection: SizeSelection) {
        match self.widgets.filters.get(grid) {
            Some(filter) => {
                filter.apply(selection);
            }
            None => tracing::warn!(grid, "Size selected for unknown product grid"),
        }
    }
}

#[async_trait]
impl PageHandler for HomePage {
    type Event = HomeEvent;

    async fn handle(&mut self, event: HomeEvent, events: &EventSender<HomeEvent>) {
        match event {
            HomeEvent::Loaded => {
                let request = self.widgets.nav.status_request();
                let events = events.clone();
                tokio::spawn(async move {
                    events.dispatch(HomeEvent::StatusLoaded(request.await));
                });
            }
            HomeEvent::StatusLoaded(status) => self.widgets.nav.apply_status(status),
            HomeEvent::LoginIconClicked => self.navigator.navigate(&self.site.login()),
            HomeEvent::CartIconClicked => self.navigator.navigate(&self.site.cart()),
            HomeEvent::LogoutClicked => {
                let request = self.widgets.nav.logout_request();
                let events = events.clone();
                tokio::spawn(async move {
                    events.dispatch(HomeEvent::LogoutFinished(request.await));
                });
            }
            HomeEvent::LogoutFinished(result) => {
                let _ = self.widgets.nav.finish_logout(result);
            }
            HomeEvent::HamburgerClicked => self.widgets.menu.open(),
            HomeEvent::MenuCloseClicked => self.widgets.menu.close(),
            HomeEvent::MenuLinkClicked => self.widgets.menu.link_clicked(),
            HomeEvent::NextSlideClicked => self.widgets.slideshow.next(),
            HomeEvent::PrevSlideClicked => self.widgets.slideshow.prev(),
            HomeEvent::SizeSelected { grid, selection } => self.apply_size(grid, selection),
            HomeEvent::AddToCartClicked(id) => self.add_to_cart(&id),
            HomeEvent::CartChanged => self.widgets.nav.refresh_cart_badge(),
        }
    }
}
