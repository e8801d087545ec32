//! Select controller composition.
//!
//! Wires the paged data source, the selection model and the dropdown
//! navigation machine behind a single operation surface, and publishes an
//! immutable snapshot through a watch channel after every applied mutation.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use lazypick_core::{SelectConfig, SelectController};
//!
//! let mut select = SelectController::new(fetcher, SelectConfig::multi());
//! let mut snapshots = select.subscribe();
//!
//! // View signals.
//! select.request_more();                 // near-end-of-list visibility
//! select.handle_key(key_event);          // keyboard contract
//! select.select_item("Alice Smith");     // pointer gesture on an item
//!
//! // Embedding event loop: apply fetch completions as they arrive.
//! tokio::select! {
//!     _ = select.next_completion() => {}
//!     _ = snapshots.changed() => { /* re-render from *snapshots.borrow() */ }
//! }
//! ```
//!
//! Fetches run on spawned tasks and report back over an internal channel
//! tagged with their request token, so a completion that was superseded by a
//! refresh - or that arrives after the controller was dropped - can never
//! mutate state.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::{mpsc, watch};

use crate::config::SelectConfig;
use crate::error::FetchError;
use crate::fetcher::PageFetcher;
use crate::navigation::{DropdownNav, NavEvent, NavOutcome, NavState};
use crate::paging::{FetchState, PageRequest, PagedDataSource, RemotePage, RequestToken};
use crate::selection::{SelectionModel, SelectionState};

/// Immutable read state published to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectSnapshot {
    pub fetch: FetchState,
    pub selection: SelectionState,
    pub nav: NavState,
}

/// Result of handling a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key is not part of the keyboard contract; nothing changed.
    Ignored,
    /// The key was consumed (open, close or highlight move).
    Handled,
    /// The highlighted item was committed; carries its label.
    Committed(String),
    /// Escape closed the dropdown without a selection change.
    Dismissed,
}

/// A fetch outcome routed back from a spawned task.
struct PageCompletion {
    token: RequestToken,
    result: Result<RemotePage, FetchError>,
}

/// Composition root coordinating loading, navigation and selection.
pub struct SelectController {
    source: PagedDataSource,
    selection: SelectionModel,
    nav: DropdownNav,
    fetcher: Arc<dyn PageFetcher>,
    completion_tx: mpsc::UnboundedSender<PageCompletion>,
    completion_rx: mpsc::UnboundedReceiver<PageCompletion>,
    snapshot_tx: watch::Sender<SelectSnapshot>,
}

impl SelectController {
    /// Create a controller over the given fetcher.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: SelectConfig) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let source = PagedDataSource::new(config.limit);
        let selection = SelectionModel::new(config.mode);
        let nav = DropdownNav::new();
        let (snapshot_tx, _) = watch::channel(SelectSnapshot {
            fetch: source.state().clone(),
            selection: selection.state().clone(),
            nav: nav.state(),
        });
        Self {
            source,
            selection,
            nav,
            fetcher,
            completion_tx,
            completion_rx,
            snapshot_tx,
        }
    }

    /// Current read state.
    pub fn snapshot(&self) -> SelectSnapshot {
        SelectSnapshot {
            fetch: self.source.state().clone(),
            selection: self.selection.state().clone(),
            nav: self.nav.state(),
        }
    }

    /// Subscribe to snapshot updates. Every applied mutation publishes.
    pub fn subscribe(&self) -> watch::Receiver<SelectSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Membership test for rendering item rows.
    pub fn is_selected(&self, label: &str) -> bool {
        self.selection.is_selected(label)
    }

    // ============================================================
    // POINTER OPERATIONS
    // ============================================================

    /// Pointer activation of the component: flip open/closed.
    pub fn open_toggle(&mut self) {
        self.nav.apply(NavEvent::ToggleOpen, self.item_count());
        self.publish();
    }

    /// Pointer activation of an item: toggle it and close the dropdown.
    /// Returns whether the label is selected afterwards.
    pub fn select_item(&mut self, label: &str) -> bool {
        let selected = self.selection.toggle(label);
        self.nav.apply(NavEvent::Close, self.item_count());
        self.publish();
        selected
    }

    /// Deselect one value. Navigation state is untouched.
    pub fn clear_item(&mut self, label: &str) {
        self.selection.remove(label);
        self.publish();
    }

    /// Deselect everything. Navigation state is untouched.
    pub fn clear_all(&mut self) {
        self.selection.clear();
        self.publish();
    }

    /// Pointer hover over the item at `index`: move the highlight there.
    pub fn hover(&mut self, index: usize) {
        self.nav.hover(index, self.item_count());
        self.publish();
    }

    /// Focus left the component: close, no selection change.
    pub fn blur(&mut self) {
        self.nav.apply(NavEvent::Blur, self.item_count());
        self.publish();
    }

    // ============================================================
    // KEYBOARD OPERATIONS
    // ============================================================

    /// Handle a key event per the keyboard contract.
    ///
    /// `Enter`/space commit the highlighted item when open and toggle the
    /// dropdown when closed; arrows open the closed dropdown without moving
    /// the highlight, and move it (clamped) while open; `Esc` dismisses.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                if !self.nav.state().is_open {
                    self.nav.apply(NavEvent::ToggleOpen, self.item_count());
                    self.publish();
                    return KeyOutcome::Handled;
                }
                let outcome = self.nav.apply(NavEvent::CommitSelection, self.item_count());
                let result = match outcome {
                    NavOutcome::Commit(index) => match self.label_at(index) {
                        Some(label) => {
                            self.selection.toggle(&label);
                            KeyOutcome::Committed(label)
                        }
                        None => KeyOutcome::Handled,
                    },
                    NavOutcome::None => KeyOutcome::Handled,
                };
                self.publish();
                result
            }
            KeyCode::Up | KeyCode::Down => {
                let event = if self.nav.state().is_open {
                    let delta = if key.code == KeyCode::Down { 1 } else { -1 };
                    NavEvent::MoveHighlight(delta)
                } else {
                    // Opening via an arrow key does not move the highlight.
                    NavEvent::Open
                };
                self.nav.apply(event, self.item_count());
                self.publish();
                KeyOutcome::Handled
            }
            KeyCode::Esc => {
                if self.nav.state().is_open {
                    self.nav.apply(NavEvent::EscapeClose, self.item_count());
                    self.publish();
                    KeyOutcome::Dismissed
                } else {
                    KeyOutcome::Ignored
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Handle a key event targeted at a selected-value chip: `Backspace` or
    /// `Enter` clears that value. Returns whether the key was consumed.
    pub fn handle_value_key(&mut self, key: KeyEvent, label: &str) -> bool {
        match key.code {
            KeyCode::Backspace | KeyCode::Enter => {
                self.clear_item(label);
                true
            }
            _ => false,
        }
    }

    // ============================================================
    // LOADING OPERATIONS
    // ============================================================

    /// Near-end-of-list signal from the view layer: fetch the next page.
    ///
    /// Safe under any calling pattern - admission is checked synchronously,
    /// so at most one fetch is ever in flight. Returns whether a request was
    /// dispatched. Must be called within a tokio runtime.
    pub fn request_more(&mut self) -> bool {
        let Some(request) = self.source.begin_request() else {
            return false;
        };
        self.dispatch(request);
        self.publish();
        true
    }

    /// Restart loading from offset 0, superseding any in-flight fetch.
    /// Accumulated items stay visible until the fresh page replaces them.
    /// Must be called within a tokio runtime.
    pub fn refresh(&mut self) {
        let request = self.source.refresh();
        self.dispatch(request);
        self.publish();
    }

    /// Await the next fetch completion and apply it.
    ///
    /// Intended for the embedding event loop to `select!` alongside its
    /// input sources. Stale completions are received and discarded here.
    pub async fn next_completion(&mut self) {
        if let Some(completion) = self.completion_rx.recv().await {
            self.apply_completion(completion);
        }
    }

    /// Apply all already-queued completions without waiting. Returns whether
    /// any of them changed state. Intended for tick-driven hosts.
    pub fn drain_completions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            changed |= self.apply_completion(completion);
        }
        changed
    }

    fn dispatch(&self, request: PageRequest) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_page(request.offset, request.limit).await;
            // The controller may be gone by now; a failed send means there
            // is nothing left to mutate.
            let _ = tx.send(PageCompletion {
                token: request.token,
                result,
            });
        });
    }

    fn apply_completion(&mut self, completion: PageCompletion) -> bool {
        if !self.source.complete(completion.token, completion.result) {
            return false;
        }
        // The item count changed: re-clamp, never reset, the highlight.
        self.nav.clamp(self.item_count());
        self.publish();
        true
    }

    fn item_count(&self) -> usize {
        self.source.state().items.len()
    }

    fn label_at(&self, index: usize) -> Option<String> {
        self.source.state().items.get(index).cloned()
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}
