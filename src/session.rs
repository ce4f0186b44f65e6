//! Advanced-search screen state machine.
//!
//! All screen state lives in [`SearchState`] and changes only through
//! [`reduce`], a pure `(state, event) -> (state, command)` function. Network
//! work is described by the returned [`Command`] and performed by the caller
//! (see [`crate::screen::SearchScreen`]), which feeds the outcome back in as
//! [`Event::SearchCompleted`].
//!
//! Every issued search carries a sequence number. A completion whose number
//! is not the latest issued one is dropped, so a slow response can never
//! overwrite a newer one.

use crate::filters::{FilterDimension, FilterState, ScalarBound};
use crate::pagination::{self, Layout, PageSlot};
use crate::parse::NO_RESULTS_MESSAGE;
use crate::query::SearchRequest;
use crate::types::{Journal, PageSize, SearchResult, Sort};

/// Executor phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// What the error banner shows.
///
/// Both variants go through the same banner; `NoResults` is informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    NoResults,
    Request(String),
}

impl std::fmt::Display for ScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoResults => f.write_str(NO_RESULTS_MESSAGE),
            Self::Request(msg) => f.write_str(msg),
        }
    }
}

/// Input to [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Toggle {
        dimension: FilterDimension,
        option_id: String,
    },
    SetBound {
        bound: ScalarBound,
        value: Option<f64>,
    },
    ClearFilters,
    SetPageSize(PageSize),
    SortChanged(Option<Sort>),
    /// Explicit search trigger (the Search button is `page: 1`).
    Search { page: u32, reset_selection: bool },
    /// Pagination click.
    GoToPage(u32),
    SearchCompleted {
        seq: u64,
        outcome: std::result::Result<SearchResult, String>,
    },
    Select(Journal),
    Deselect,
    ToggleFilterPanel,
}

/// Side effect requested by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Send `request`; supersedes anything still in flight.
    Fetch { seq: u64, request: SearchRequest },
    /// Drop whatever is in flight.
    CancelInFlight,
}

/// What the result area shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Detail(&'a Journal),
    List(&'a [Journal]),
    Empty,
}

/// Full state of one advanced-search screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub filters: FilterState,
    pub page_size: PageSize,
    pub sort: Option<Sort>,
    /// Page of the displayed result set.
    pub current_page: u32,
    pub phase: Phase,
    pub error: Option<ScreenError>,
    pub result: SearchResult,
    pub selected: Option<Journal>,
    pub filters_expanded: bool,
    latest_seq: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            page_size: PageSize::default(),
            sort: None,
            current_page: 1,
            phase: Phase::Idle,
            error: None,
            result: SearchResult::default(),
            selected: None,
            filters_expanded: true,
            latest_seq: 0,
        }
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Text for the error banner, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    /// Whether the Search button is enabled.
    pub fn can_search(&self) -> bool {
        self.filters.active_count() > 0 && !self.is_loading()
    }

    pub fn page_count(&self) -> u32 {
        pagination::page_count(self.result.total_count, self.page_size.get())
    }

    /// Page-link row; empty when there is a single page or none.
    pub fn page_links(&self, layout: Layout) -> Vec<PageSlot> {
        let count = self.page_count();
        if !pagination::shows_controls(count) {
            return Vec::new();
        }
        pagination::page_window(self.current_page, count, layout)
    }

    /// Sequence number of the most recently issued search.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Detail view and list view are exclusive.
    pub fn view(&self) -> View<'_> {
        match &self.selected {
            Some(journal) => View::Detail(journal),
            None if !self.result.items.is_empty() => View::List(&self.result.items),
            None => View::Empty,
        }
    }

    fn search(mut self, page: u32, reset_selection: bool) -> (Self, Option<Command>) {
        if self.filters.is_empty() {
            tracing::debug!("search rejected: no active filters");
            return (self, None);
        }

        let page = page.max(1);
        self.latest_seq += 1;
        self.phase = Phase::Loading;
        self.error = None;
        if page == 1 {
            self.result.items.clear();
        }
        if page == 1 || reset_selection {
            self.selected = None;
        }

        let request = SearchRequest::new(self.filters.clone())
            .page(page)
            .page_size(self.page_size)
            .sort(self.sort);
        tracing::debug!(seq = self.latest_seq, page, "search issued");

        let seq = self.latest_seq;
        (self, Some(Command::Fetch { seq, request }))
    }

    fn complete(
        mut self,
        seq: u64,
        outcome: std::result::Result<SearchResult, String>,
    ) -> Self {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "stale search response discarded");
            return self;
        }

        match outcome {
            Ok(result) => {
                self.current_page = result.page.max(1);
                if result.items.is_empty() {
                    self.phase = Phase::Failure;
                    self.error = Some(ScreenError::NoResults);
                } else {
                    self.phase = Phase::Success;
                    self.error = None;
                    self.filters_expanded = false;
                }
                self.result = result;
            }
            Err(message) => {
                tracing::warn!(seq, %message, "search failed");
                self.phase = Phase::Failure;
                self.error = Some(ScreenError::Request(message));
            }
        }
        self
    }
}

/// Apply one event to the screen state.
pub fn reduce(mut state: SearchState, event: Event) -> (SearchState, Option<Command>) {
    match event {
        Event::Toggle {
            dimension,
            option_id,
        } => {
            state.filters.toggle(dimension, option_id);
            (state, None)
        }
        Event::SetBound { bound, value } => {
            state.filters.set_scalar(bound, value);
            (state, None)
        }
        Event::ClearFilters => {
            let was_loading = state.is_loading();
            // bumping the sequence orphans any response still in flight
            let latest_seq = state.latest_seq + 1;
            let next = SearchState {
                page_size: state.page_size,
                sort: state.sort,
                filters_expanded: state.filters_expanded,
                latest_seq,
                ..SearchState::default()
            };
            (next, was_loading.then_some(Command::CancelInFlight))
        }
        Event::SetPageSize(size) => {
            state.page_size = size;
            if state.result.items.is_empty() {
                state.current_page = 1;
                (state, None)
            } else if state.filters.is_empty() {
                // the shown page was cut at the old size and cannot be refetched
                tracing::debug!("page size changed without filters; dropping stale results");
                state.result = SearchResult::default();
                state.current_page = 1;
                state.selected = None;
                state.error = None;
                let was_loading = state.is_loading();
                state.latest_seq += 1;
                state.phase = Phase::Idle;
                (state, was_loading.then_some(Command::CancelInFlight))
            } else {
                state.search(1, true)
            }
        }
        Event::SortChanged(sort) => {
            state.sort = sort;
            state.search(1, true)
        }
        Event::Search {
            page,
            reset_selection,
        } => state.search(page, reset_selection),
        Event::GoToPage(page) => {
            if page < 1
                || page > state.page_count()
                || page == state.current_page
                || state.is_loading()
            {
                return (state, None);
            }
            state.search(page, false)
        }
        Event::SearchCompleted { seq, outcome } => (state.complete(seq, outcome), None),
        Event::Select(journal) => {
            if state.result.items.contains(&journal) {
                state.selected = Some(journal);
            }
            (state, None)
        }
        Event::Deselect => {
            state.selected = None;
            (state, None)
        }
        Event::ToggleFilterPanel => {
            state.filters_expanded = !state.filters_expanded;
            (state, None)
        }
    }
}
