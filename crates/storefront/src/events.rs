//! Page event loops.
//!
//! Each page runs one loop that owns its controller and handles UI events one
//! at a time, like a browser's event loop. Long-running work (network calls)
//! is spawned and posts its result back as another event, so the loop keeps
//! handling clicks while a request is in flight.
//!
//! [`mount`] returns the sender used to dispatch events and a
//! [`Subscription`]; dropping the subscription tears the page down.
//!
//! # Example
//!
//! ```rust,ignore
//! let (events, subscription) = events::mount(controller);
//! events.dispatch(AuthFormEvent::SwitchClicked);
//! subscription.dispose();
//! ```

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A page controller driven by a stream of events.
#[async_trait]
pub trait PageHandler: Send + 'static {
    /// Events this page reacts to.
    type Event: Send + 'static;

    /// Handle one event. `events` posts follow-up events to the same loop.
    async fn handle(&mut self, event: Self::Event, events: &EventSender<Self::Event>);
}

/// Dispatches events to a mounted page.
#[derive(Debug)]
pub struct EventSender<E> {
    tx: mpsc::UnboundedSender<E>,
}

impl<E> Clone for EventSender<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> EventSender<E> {
    /// Queue an event. Returns `false` if the page has been torn down.
    pub fn dispatch(&self, event: E) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Returns `true` if the page has been torn down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Keeps a page mounted. Dropping it stops the page's event loop.
#[derive(Debug)]
#[must_use = "dropping a Subscription unmounts the page"]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Stop the page's event loop now.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start an event loop for `handler` on the current Tokio runtime.
pub fn mount<H: PageHandler>(mut handler: H) -> (EventSender<H::Event>, Subscription) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let events = EventSender { tx };
    let loop_events = events.clone();

    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            handler.handle(event, &loop_events).await;
        }
    });

    (events, Subscription { handle })
}
