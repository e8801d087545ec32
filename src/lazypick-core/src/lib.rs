//! Headless select controller for incrementally loaded lists.
//!
//! This crate coordinates three concerns behind one controller: paginated
//! remote loading with stale-response protection, a keyboard/pointer
//! navigation state machine, and a single- or multi-value selection model.
//! It performs no rendering and reads no input devices - the view layer
//! feeds it key events and visibility signals and re-renders from the
//! snapshots it publishes.
//!
//! The transport is abstracted behind [`PageFetcher`]; `lazypick-remote`
//! provides the reference HTTP implementation.

mod config;
mod controller;
mod error;
mod fetcher;
mod navigation;
mod paging;
mod selection;

pub use config::{DEFAULT_PAGE_LIMIT, SelectConfig};
pub use controller::{KeyOutcome, SelectController, SelectSnapshot};
pub use error::{FetchError, Result};
pub use fetcher::PageFetcher;
pub use navigation::{DropdownNav, NavEvent, NavOutcome, NavState};
pub use paging::{FetchState, PageRequest, PagedDataSource, RemotePage, RequestToken};
pub use selection::{SelectionMode, SelectionModel, SelectionState};
