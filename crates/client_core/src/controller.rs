use chrono::Utc;
use shared::{
    domain::KeywordList,
    protocol::{ScrapeJobsRequest, ScrapeJobsResponse},
};
use tracing::{debug, info, warn};

use crate::{
    error::SearchError,
    session::{SearchStatus, SessionState},
    transport::SearchTransport,
};

/// A dispatched search: the request to send and the generation its result
/// must be reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub generation: u64,
    pub request: ScrapeJobsRequest,
}

/// Owns the session and drives it through `Idle -> Searching -> Success|Error`.
///
/// At most one search is in flight. `status == Searching` is the guard, and
/// the generation number ties a resolution to the search that produced it.
#[derive(Debug, Default)]
pub struct SearchController {
    state: SessionState,
    next_generation: u64,
    in_flight: Option<u64>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn in_flight_generation(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn update_keyword_input(&mut self, text: impl Into<String>) {
        self.state.raw_keyword_input = text.into();
    }

    /// Validates the input and moves to `Searching`.
    ///
    /// Returns `None` without touching the state when a search is already in
    /// flight or the input holds no keywords.
    pub fn begin_search(&mut self) -> Option<PendingSearch> {
        if self.state.status == SearchStatus::Searching {
            debug!("search already in flight; ignoring submit");
            return None;
        }

        let keywords = KeywordList::parse(&self.state.raw_keyword_input);
        if keywords.is_empty() {
            debug!("keyword input is blank; ignoring submit");
            return None;
        }

        self.next_generation += 1;
        let generation = self.next_generation;

        self.state.clear_results();
        self.state.status = SearchStatus::Searching;
        self.state.last_keywords = Some(keywords.clone());
        self.in_flight = Some(generation);

        info!(generation, keyword_count = keywords.len(), %keywords, "search started");
        Some(PendingSearch {
            generation,
            request: ScrapeJobsRequest::new(keywords),
        })
    }

    /// Applies the resolution of search `generation`.
    ///
    /// Returns `false` and leaves the state alone if that search is not the
    /// one currently in flight.
    pub fn complete_search(
        &mut self,
        generation: u64,
        result: Result<ScrapeJobsResponse, SearchError>,
    ) -> bool {
        if self.in_flight != Some(generation) {
            warn!(
                generation,
                in_flight = ?self.in_flight,
                "discarding result of a search that is no longer in flight"
            );
            return false;
        }
        self.in_flight = None;
        self.state.completed_at = Some(Utc::now());

        match result {
            Ok(response) if !response.jobs.is_empty() => {
                info!(
                    generation,
                    jobs = response.jobs.len(),
                    keyword_groups = response.companies_by_keyword.len(),
                    "search succeeded"
                );
                let ScrapeJobsResponse {
                    jobs,
                    companies_by_keyword,
                } = response;
                self.state.jobs = jobs;
                self.state.companies_by_keyword = companies_by_keyword;
                self.state.status = SearchStatus::Success;
            }
            Ok(_) => {
                info!(generation, "search returned no jobs");
                self.fail(SearchError::EmptyResult);
            }
            Err(err) => {
                warn!(generation, kind = ?err.kind(), "search failed: {err}");
                self.fail(err);
            }
        }
        true
    }

    /// Runs one full search cycle against `transport`.
    ///
    /// Returns whether a request was issued.
    pub async fn submit_search<T>(&mut self, transport: &T) -> bool
    where
        T: SearchTransport + ?Sized,
    {
        let Some(pending) = self.begin_search() else {
            return false;
        };
        let result = transport.scrape_jobs(&pending.request).await;
        self.complete_search(pending.generation, result);
        true
    }

    fn fail(&mut self, err: SearchError) {
        self.state.jobs.clear();
        self.state.companies_by_keyword = Default::default();
        self.state.last_error = Some(err);
        self.state.status = SearchStatus::Error;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
