//! Paged data source.
//!
//! Owns remote-page accumulation and the loading/error/has_more bookkeeping
//! for an incrementally loaded list. The source never performs I/O itself:
//! `begin_request` admits (or rejects) a fetch and hands back a
//! [`PageRequest`] describing it, and `complete` applies the outcome. Every
//! admitted request carries a monotonically increasing token; a completion
//! bearing any other token is stale and is discarded without touching state.

use crate::error::FetchError;

/// Identifies the most recently admitted fetch. Completions carrying an
/// older token lost the race (superseded by a refresh) and are dropped.
pub type RequestToken = u64;

/// A fetch admitted by [`PagedDataSource::begin_request`], to be executed by
/// the dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of leading items the remote side should skip.
    pub offset: usize,
    /// Page size.
    pub limit: usize,
    /// Token the completion must echo back.
    pub token: RequestToken,
}

/// One successfully fetched page, already projected to display labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePage {
    /// Formatted display strings, in remote order.
    pub labels: Vec<String>,
    /// Total number of records known to the remote side.
    pub total: u64,
}

/// Accumulated fetch state, as exposed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState {
    /// All items loaded so far, in remote order.
    pub items: Vec<String>,
    /// Whether a fetch is currently in flight.
    pub loading: bool,
    /// The most recent fetch failure, cleared by the next success.
    pub error: Option<FetchError>,
    /// Whether the most recent completed fetch succeeded.
    pub success: bool,
    /// Whether additional unfetched items are known to exist remotely.
    pub has_more: bool,
}

impl Default for FetchState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            success: false,
            // Nothing fetched yet: assume more so the first request is
            // admissible.
            has_more: true,
        }
    }
}

/// Bookkeeping for the single fetch that may be in flight.
#[derive(Debug, Clone, Copy)]
struct InFlight {
    token: RequestToken,
    offset: usize,
}

/// Owns page fetching admission, accumulation and completion.
#[derive(Debug)]
pub struct PagedDataSource {
    state: FetchState,
    limit: usize,
    next_token: RequestToken,
    in_flight: Option<InFlight>,
}

impl PagedDataSource {
    /// Create an empty source fetching pages of `limit` items.
    pub fn new(limit: usize) -> Self {
        Self {
            state: FetchState::default(),
            limit: limit.max(1),
            next_token: 0,
            in_flight: None,
        }
    }

    /// Current accumulated state.
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Page size used for each request.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Admit the next page fetch, or refuse it.
    ///
    /// Returns `None` while a fetch is in flight or once the remote side has
    /// no more items. The check happens synchronously, before any
    /// asynchronous work starts, which is what suppresses duplicate
    /// concurrent requests.
    pub fn begin_request(&mut self) -> Option<PageRequest> {
        if self.state.loading || !self.state.has_more {
            return None;
        }
        let request = self.admit(self.state.items.len());
        tracing::debug!(
            offset = request.offset,
            limit = request.limit,
            token = request.token,
            "dispatching page fetch"
        );
        Some(request)
    }

    /// Restart from offset 0, superseding any in-flight fetch.
    ///
    /// The in-flight completion, if one arrives later, fails the token check
    /// and is discarded. Accumulated items stay visible until the fresh page
    /// replaces them.
    pub fn refresh(&mut self) -> PageRequest {
        self.state.has_more = true;
        let request = self.admit(0);
        tracing::debug!(token = request.token, "refreshing from offset 0");
        request
    }

    fn admit(&mut self, offset: usize) -> PageRequest {
        self.next_token += 1;
        self.state.loading = true;
        self.in_flight = Some(InFlight {
            token: self.next_token,
            offset,
        });
        PageRequest {
            offset,
            limit: self.limit,
            token: self.next_token,
        }
    }

    /// Apply a fetch outcome. Returns whether state changed.
    ///
    /// A completion whose token is not the most recently admitted one is
    /// discarded without mutating state.
    pub fn complete(&mut self, token: RequestToken, result: Result<RemotePage, FetchError>) -> bool {
        let Some(in_flight) = self.in_flight else {
            tracing::trace!(token, "discarding completion with no fetch in flight");
            return false;
        };
        if in_flight.token != token {
            tracing::trace!(
                token,
                current = in_flight.token,
                "discarding stale page completion"
            );
            return false;
        }
        self.in_flight = None;
        self.state.loading = false;

        match result {
            Ok(page) => {
                let fetched = page.labels.len();
                if in_flight.offset == 0 {
                    self.state.items = page.labels;
                } else {
                    self.state.items.extend(page.labels);
                }
                self.state.has_more = page.total > (in_flight.offset + self.limit) as u64;
                self.state.success = true;
                self.state.error = None;
                tracing::debug!(
                    fetched,
                    accumulated = self.state.items.len(),
                    total = page.total,
                    has_more = self.state.has_more,
                    "applied page"
                );
            }
            Err(err) => {
                tracing::warn!(token, error = %err, "page fetch failed");
                self.state.success = false;
                self.state.error = Some(err);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(range: std::ops::Range<usize>) -> Vec<String> {
        range.map(|i| format!("Person {i}")).collect()
    }

    #[test]
    fn test_first_request_starts_at_zero() {
        let mut source = PagedDataSource::new(20);
        let request = source.begin_request().expect("first request admitted");
        assert_eq!(request.offset, 0);
        assert_eq!(request.limit, 20);
        assert!(source.state().loading);
    }

    #[test]
    fn test_loading_gate_admits_exactly_one() {
        let mut source = PagedDataSource::new(20);
        let request = source.begin_request().expect("admitted");
        // A burst of further calls while loading dispatches nothing.
        assert!(source.begin_request().is_none());
        assert!(source.begin_request().is_none());
        source.complete(
            request.token,
            Ok(RemotePage {
                labels: labels(0..20),
                total: 55,
            }),
        );
        assert!(source.begin_request().is_some());
    }

    #[test]
    fn test_pagination_scenario() {
        // limit=20, total=55: 20 -> 40 -> 55, then nothing to fetch.
        let mut source = PagedDataSource::new(20);

        let r1 = source.begin_request().unwrap();
        assert!(source.complete(
            r1.token,
            Ok(RemotePage {
                labels: labels(0..20),
                total: 55,
            }),
        ));
        assert_eq!(source.state().items.len(), 20);
        assert!(source.state().has_more);

        let r2 = source.begin_request().unwrap();
        assert_eq!(r2.offset, 20);
        source.complete(
            r2.token,
            Ok(RemotePage {
                labels: labels(20..40),
                total: 55,
            }),
        );
        assert_eq!(source.state().items.len(), 40);
        assert!(source.state().has_more);

        let r3 = source.begin_request().unwrap();
        assert_eq!(r3.offset, 40);
        source.complete(
            r3.token,
            Ok(RemotePage {
                labels: labels(40..55),
                total: 55,
            }),
        );
        assert_eq!(source.state().items.len(), 55);
        assert!(!source.state().has_more);

        assert!(source.begin_request().is_none());
    }

    #[test]
    fn test_accumulation_is_ordered_concatenation() {
        let mut source = PagedDataSource::new(2);
        for page in 0..3usize {
            let request = source.begin_request().unwrap();
            source.complete(
                request.token,
                Ok(RemotePage {
                    labels: labels(page * 2..page * 2 + 2),
                    total: 6,
                }),
            );
        }
        assert_eq!(source.state().items, labels(0..6));
    }

    #[test]
    fn test_failure_keeps_items_and_has_more() {
        let mut source = PagedDataSource::new(20);
        let r1 = source.begin_request().unwrap();
        source.complete(
            r1.token,
            Ok(RemotePage {
                labels: labels(0..20),
                total: 55,
            }),
        );

        let r2 = source.begin_request().unwrap();
        source.complete(r2.token, Err(FetchError::remote(Some(500), "boom")));

        let state = source.state();
        assert_eq!(state.items.len(), 20);
        assert!(state.has_more);
        assert!(!state.loading);
        assert!(!state.success);
        assert!(state.error.as_ref().is_some_and(FetchError::is_remote));

        // The next request is the retry path and resumes from the same offset.
        let r3 = source.begin_request().expect("retry admitted");
        assert_eq!(r3.offset, 20);
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut source = PagedDataSource::new(20);
        let r1 = source.begin_request().unwrap();
        source.complete(r1.token, Err(FetchError::local("bad payload")));
        assert!(source.state().error.is_some());

        let r2 = source.begin_request().unwrap();
        source.complete(
            r2.token,
            Ok(RemotePage {
                labels: labels(0..20),
                total: 55,
            }),
        );
        assert!(source.state().error.is_none());
        assert!(source.state().success);
    }

    #[test]
    fn test_stale_completion_discarded_after_refresh() {
        let mut source = PagedDataSource::new(20);
        let superseded = source.begin_request().unwrap();
        let fresh = source.refresh();

        // The superseded response arrives late and must not mutate state.
        assert!(!source.complete(
            superseded.token,
            Ok(RemotePage {
                labels: labels(0..20),
                total: 55,
            }),
        ));
        assert!(source.state().items.is_empty());
        assert!(source.state().loading);

        assert!(source.complete(
            fresh.token,
            Ok(RemotePage {
                labels: labels(0..5),
                total: 5,
            }),
        ));
        assert_eq!(source.state().items.len(), 5);
        assert!(!source.state().has_more);
    }

    #[test]
    fn test_refresh_replaces_accumulated_items() {
        let mut source = PagedDataSource::new(20);
        let r1 = source.begin_request().unwrap();
        source.complete(
            r1.token,
            Ok(RemotePage {
                labels: labels(0..20),
                total: 55,
            }),
        );
        let r2 = source.begin_request().unwrap();
        source.complete(
            r2.token,
            Ok(RemotePage {
                labels: labels(20..40),
                total: 55,
            }),
        );
        assert_eq!(source.state().items.len(), 40);

        let fresh = source.refresh();
        assert_eq!(fresh.offset, 0);
        source.complete(
            fresh.token,
            Ok(RemotePage {
                labels: labels(0..20),
                total: 55,
            }),
        );
        // Offset 0 replaces rather than appends.
        assert_eq!(source.state().items, labels(0..20));
    }
}
