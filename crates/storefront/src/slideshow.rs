//! Homepage hero slideshow.
//!
//! On wide viewports one slide is shown at a time and advances on a timer;
//! a manual step restarts the timer. Narrow viewports show every slide and
//! leave scrolling to the browser.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::config::Timings;
use crate::timer::ScheduledTask;

pub trait SlideView: Send + Sync {
    /// Make `index` the only visible slide.
    fn show_slide(&self, index: usize);

    /// Make every slide visible for native scrolling.
    fn show_all(&self);
}

#[derive(Debug)]
struct Deck {
    index: usize,
    len: usize,
}

impl Deck {
    const fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    const fn prev(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }
}

pub struct Slideshow {
    view: Arc<dyn SlideView>,
    deck: Option<Arc<Mutex<Deck>>>,
    interval: Duration,
    auto: Option<ScheduledTask>,
}

impl Slideshow {
    /// Set up the slideshow for a viewport `viewport_width` pixels wide.
    ///
    /// With no slides nothing is rendered and no timer runs.
    pub fn start(
        view: Arc<dyn SlideView>,
        slide_count: usize,
        viewport_width: u32,
        timings: &Timings,
    ) -> Self {
        let mut slideshow = Self {
            view,
            deck: None,
            interval: timings.slideshow_interval,
            auto: None,
        };

        if slide_count == 0 {
            return slideshow;
        }
        if viewport_width <= timings.mobile_breakpoint_px {
            tracing::debug!(viewport_width, "Narrow viewport, showing all slides");
            slideshow.view.show_all();
            return slideshow;
        }

        slideshow.deck = Some(Arc::new(Mutex::new(Deck {
            index: 0,
            len: slide_count,
        })));
        slideshow.view.show_slide(0);
        slideshow.restart_timer();
        slideshow
    }

    /// Index of the visible slide, or `None` when not cycling.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.deck.as_ref().map(|deck| lock(deck).index)
    }

    /// Step forward and restart the timer.
    pub fn next(&mut self) {
        self.step(Deck::next);
    }

    /// Step back and restart the timer.
    pub fn prev(&mut self) {
        self.step(Deck::prev);
    }

    fn step(&mut self, advance: fn(&mut Deck) -> usize) {
        let Some(deck) = &self.deck else { return };
        let index = advance(&mut lock(deck));
        self.view.show_slide(index);
        self.restart_timer();
    }

    fn restart_timer(&mut self) {
        let Some(deck) = &self.deck else { return };
        let deck = Arc::clone(deck);
        let view = Arc::clone(&self.view);
        // Replacing the task aborts the previous one.
        self.auto = Some(ScheduledTask::every(self.interval, move || {
            let index = lock(&deck).next();
            view.show_slide(index);
        }));
    }
}

fn lock(deck: &Mutex<Deck>) -> std::sync::MutexGuard<'_, Deck> {
    deck.lock().unwrap_or_else(PoisonError::into_inner)
}
