//! The page environment the controllers run in.
//!
//! Controllers never touch a real browser. They talk to a [`Navigator`] for
//! the current URL and page changes, and to a [`Storage`] for persisted
//! client state. Headless implementations of both live here; a browser
//! front end provides its own.

mod navigator;
mod storage;

pub use navigator::{HeadlessNavigator, Navigator, query_param, without_query_param};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
