//! Async driver for the advanced-search screen.
//!
//! Wraps a [`SearchState`] and runs the commands [`reduce`] emits: each
//! fetch is spawned on the runtime and its outcome comes back through a
//! channel as [`Event::SearchCompleted`]. A new fetch aborts the one it
//! supersedes; the sequence check in [`reduce`] is what keeps the state
//! correct if an aborted request still manages to answer.

use crate::client::CatalogClient;
use crate::error::HjrsError;
use crate::filters::{FilterDimension, ScalarBound};
use crate::reference::ReferenceCache;
use crate::session::{reduce, Command, Event, SearchState};
use crate::types::{Journal, PageSize, SearchResult, Sort};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

type Completion = (u64, std::result::Result<SearchResult, String>);

/// Banner text for a failed filtered search.
pub fn search_error_message(err: &HjrsError) -> String {
    match err {
        HjrsError::Api { .. } | HjrsError::NotFound(_) | HjrsError::Unauthorized { .. } => {
            "Failed to fetch search results".to_string()
        }
        other => other.to_string(),
    }
}

/// One advanced-search screen bound to a catalog client.
pub struct SearchScreen {
    client: CatalogClient,
    reference: ReferenceCache,
    state: SearchState,
    in_flight: Option<(u64, AbortHandle)>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl SearchScreen {
    /// Open the screen, loading the reference lists first.
    pub async fn open(client: CatalogClient) -> Self {
        let reference = ReferenceCache::load(&client).await;
        Self::with_reference(client, reference)
    }

    pub fn with_reference(client: CatalogClient, reference: ReferenceCache) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            reference,
            state: SearchState::new(),
            in_flight: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn reference(&self) -> &ReferenceCache {
        &self.reference
    }

    /// Whether a fetch is outstanding.
    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply an event and start whatever request it calls for.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&mut self, event: Event) {
        let (state, command) = reduce(std::mem::take(&mut self.state), event);
        self.state = state;

        match command {
            Some(Command::Fetch { seq, request }) => {
                self.abort_in_flight();
                let client = self.client.clone();
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    let outcome = client
                        .filtered_search(&request)
                        .await
                        .map_err(|e| search_error_message(&e));
                    // receiver gone means the screen was dropped
                    let _ = tx.send((seq, outcome));
                });
                self.in_flight = Some((seq, handle.abort_handle()));
            }
            Some(Command::CancelInFlight) => self.abort_in_flight(),
            None => {}
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some((seq, handle)) = self.in_flight.take() {
            tracing::debug!(seq, "aborting superseded search");
            handle.abort();
        }
    }

    /// Wait for one completion and apply it. Returns `false` if nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight.is_none() {
            return false;
        }
        let Some((seq, outcome)) = self.rx.recv().await else {
            return false;
        };
        if self.in_flight.as_ref().is_some_and(|(current, _)| *current == seq) {
            self.in_flight = None;
        }
        self.dispatch(Event::SearchCompleted { seq, outcome });
        true
    }

    /// Drive completions until no request is outstanding.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    pub fn toggle(&mut self, dimension: FilterDimension, option_id: impl Into<String>) {
        self.dispatch(Event::Toggle {
            dimension,
            option_id: option_id.into(),
        });
    }

    pub fn set_bound(&mut self, bound: ScalarBound, value: Option<f64>) {
        self.dispatch(Event::SetBound { bound, value });
    }

    pub fn clear(&mut self) {
        self.dispatch(Event::ClearFilters);
    }

    /// Search button: page 1, selection reset.
    pub fn search(&mut self) {
        self.dispatch(Event::Search {
            page: 1,
            reset_selection: true,
        });
    }

    pub fn go_to(&mut self, page: u32) {
        self.dispatch(Event::GoToPage(page));
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.dispatch(Event::SetPageSize(size));
    }

    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.dispatch(Event::SortChanged(sort));
    }

    pub fn select(&mut self, journal: Journal) {
        self.dispatch(Event::Select(journal));
    }

    pub fn deselect(&mut self) {
        self.dispatch(Event::Deselect);
    }
}
