use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::AppError;
use crate::models::search::SearchResultItem;
use crate::navigation::NavigationRequest;

/// Where the search box is in its lookup cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No qualifying text; nothing pending, panel hidden.
    #[default]
    Idle,
    /// Qualifying text, waiting for typing to pause.
    PendingDebounce,
    /// A lookup for the current text is in flight.
    AwaitingResults,
    /// The panel is showing results for the current text.
    ShowingResults,
    /// The panel was closed; query and cached results are kept.
    Dismissed,
}

/// Monotonic identifier of a dispatched lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Inputs to the search box state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    QueryChanged(String),
    /// The debounce timer identified by `ticket` fired.
    DebounceElapsed { ticket: u64 },
    ResultsArrived {
        request: RequestId,
        outcome: Result<Vec<SearchResultItem>, AppError>,
    },
    Focused,
    Dismissed,
    Submitted,
    SuggestionSelected { id: String },
}

/// Side effects requested by a transition. The driver runs them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    /// Cancel any running debounce timer and start a new one.
    ScheduleDebounce { ticket: u64, delay: Duration },
    CancelDebounce,
    Fetch { request: RequestId, query: String },
    Navigate(NavigationRequest),
}

/// The single state value owned by one mounted search box.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    config: SearchConfig,
    query: String,
    phase: SearchPhase,
    results: Vec<SearchResultItem>,
    /// Trimmed query text `results` were fetched for.
    results_for: Option<String>,
    ticket: u64,
    next_request: u64,
    in_flight: Option<RequestId>,
}

impl SearchSession {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn visible(&self) -> bool {
        self.phase == SearchPhase::ShowingResults
    }

    fn trimmed(&self) -> &str {
        self.query.trim()
    }

    fn qualifies(&self) -> bool {
        self.trimmed().chars().count() >= self.config.min_query_len
    }

    /// Apply one event and return the effects the driver must run.
    pub fn apply(&mut self, event: SearchEvent) -> Vec<SearchEffect> {
        match event {
            SearchEvent::QueryChanged(text) => self.on_query_changed(text),
            SearchEvent::DebounceElapsed { ticket } => self.on_debounce_elapsed(ticket),
            SearchEvent::ResultsArrived { request, outcome } => {
                self.on_results(request, outcome);
                Vec::new()
            }
            SearchEvent::Focused => self.on_focused(),
            SearchEvent::Dismissed => self.on_dismissed(),
            SearchEvent::Submitted => self.on_submitted(),
            SearchEvent::SuggestionSelected { id } => {
                let mut effects = self.on_dismissed();
                effects.push(SearchEffect::Navigate(NavigationRequest::PostDetail { id }));
                effects
            }
        }
    }

    fn on_query_changed(&mut self, text: String) -> Vec<SearchEffect> {
        let same_lookup = self.query.trim() == text.trim();
        self.query = text;

        // Whitespace-only edits leave a live lookup, its timer or its results alone.
        if same_lookup
            && matches!(
                self.phase,
                SearchPhase::PendingDebounce | SearchPhase::AwaitingResults | SearchPhase::ShowingResults
            )
        {
            return Vec::new();
        }

        // Whatever was in flight belongs to older text now.
        self.in_flight = None;

        if !self.qualifies() {
            self.phase = SearchPhase::Idle;
            self.results.clear();
            self.results_for = None;
            return vec![SearchEffect::CancelDebounce];
        }

        self.schedule()
    }

    fn schedule(&mut self) -> Vec<SearchEffect> {
        self.ticket += 1;
        self.phase = SearchPhase::PendingDebounce;
        vec![SearchEffect::ScheduleDebounce {
            ticket: self.ticket,
            delay: self.config.debounce(),
        }]
    }

    fn on_debounce_elapsed(&mut self, ticket: u64) -> Vec<SearchEffect> {
        if ticket != self.ticket || self.phase != SearchPhase::PendingDebounce {
            tracing::debug!(ticket, current = self.ticket, "Ignoring superseded debounce timer");
            return Vec::new();
        }

        let query = self.trimmed().to_string();
        if self.results_for.as_deref() == Some(query.as_str()) {
            // Settled back on the text we already hold results for.
            self.phase = SearchPhase::ShowingResults;
            return Vec::new();
        }

        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.in_flight = Some(request);
        self.phase = SearchPhase::AwaitingResults;
        vec![SearchEffect::Fetch { request, query }]
    }

    fn on_results(
        &mut self,
        request: RequestId,
        outcome: Result<Vec<SearchResultItem>, AppError>,
    ) {
        if self.in_flight != Some(request) {
            tracing::debug!(?request, latest = ?self.in_flight, "Discarding stale search response");
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(items) => {
                self.results = items;
                self.results_for = Some(self.trimmed().to_string());
                self.phase = SearchPhase::ShowingResults;
            }
            Err(e) => {
                if e.is_transport() {
                    tracing::warn!(query = %self.trimmed(), "Live search failed: {e}");
                } else {
                    tracing::debug!(query = %self.trimmed(), "Live search rejected: {e}");
                }
                self.results.clear();
                self.results_for = None;
                self.phase = SearchPhase::Dismissed;
            }
        }
    }

    fn on_focused(&mut self) -> Vec<SearchEffect> {
        if self.phase != SearchPhase::Dismissed || !self.qualifies() {
            return Vec::new();
        }
        if self.results_for.as_deref() == Some(self.trimmed()) {
            self.phase = SearchPhase::ShowingResults;
            return Vec::new();
        }
        // The lookup for this text was cut short by a dismissal or failed.
        self.schedule()
    }

    fn on_dismissed(&mut self) -> Vec<SearchEffect> {
        match self.phase {
            SearchPhase::Idle => Vec::new(),
            SearchPhase::ShowingResults | SearchPhase::Dismissed => {
                self.phase = SearchPhase::Dismissed;
                Vec::new()
            }
            SearchPhase::PendingDebounce | SearchPhase::AwaitingResults => {
                self.phase = SearchPhase::Dismissed;
                self.in_flight = None;
                vec![SearchEffect::CancelDebounce]
            }
        }
    }

    fn on_submitted(&mut self) -> Vec<SearchEffect> {
        if self.trimmed().is_empty() {
            tracing::trace!("{}", AppError::EmptyQuery);
            return Vec::new();
        }

        self.in_flight = None;
        if self.phase != SearchPhase::Idle {
            self.phase = SearchPhase::Dismissed;
        }
        vec![
            SearchEffect::CancelDebounce,
            SearchEffect::Navigate(NavigationRequest::SearchResults {
                query: self.query.clone(),
            }),
        ]
    }
}
