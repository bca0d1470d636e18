use chrono::{DateTime, Utc};
use shared::{
    domain::KeywordList,
    protocol::{CompanyGroups, JobPosting},
};

use crate::error::{SearchError, SearchErrorKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching,
    Success,
    Error,
}

/// Everything the client knows about the current search.
///
/// Only [`crate::controller::SearchController`] can change it; everyone else
/// gets a shared reference.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) raw_keyword_input: String,
    pub(crate) status: SearchStatus,
    pub(crate) jobs: Vec<JobPosting>,
    pub(crate) companies_by_keyword: CompanyGroups,
    pub(crate) last_error: Option<SearchError>,
    pub(crate) last_keywords: Option<KeywordList>,
    pub(crate) completed_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn raw_keyword_input(&self) -> &str {
        &self.raw_keyword_input
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_searching(&self) -> bool {
        self.status == SearchStatus::Searching
    }

    /// Whether the search trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_searching() && !KeywordList::parse(&self.raw_keyword_input).is_empty()
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn companies_by_keyword(&self) -> &CompanyGroups {
        &self.companies_by_keyword
    }

    pub fn last_error(&self) -> Option<&SearchError> {
        self.last_error.as_ref()
    }

    pub fn last_error_kind(&self) -> Option<SearchErrorKind> {
        self.last_error.as_ref().map(SearchError::kind)
    }

    pub fn last_error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(SearchError::user_message)
    }

    pub fn last_keywords(&self) -> Option<&KeywordList> {
        self.last_keywords.as_ref()
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub(crate) fn clear_results(&mut self) {
        self.jobs.clear();
        self.companies_by_keyword = CompanyGroups::new();
        self.last_error = None;
        self.completed_at = None;
    }
}
