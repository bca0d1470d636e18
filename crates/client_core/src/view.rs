//! Read-only projections of [`SessionState`] for the front ends.

use serde::Serialize;
use shared::protocol::JobPosting;
use url::Url;

use crate::session::{SearchStatus, SessionState};

pub const IDLE_HINT: &str =
    "Enter keywords (comma-separated), e.g. python developer, react developer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Job,
    Company,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Job => "View Job",
            Self::Company => "View Company",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionLink {
    pub kind: LinkKind,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    pub links: Vec<ActionLink>,
}

impl From<&JobPosting> for JobCard {
    fn from(job: &JobPosting) -> Self {
        let links = [
            (LinkKind::Job, job.job_link.as_ref()),
            (LinkKind::Company, job.company_link.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, url)| {
            url.map(|url| ActionLink {
                kind,
                url: url.clone(),
            })
        })
        .collect();

        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            keyword: job.keyword.clone(),
            salary: job.salary.clone(),
            posted_date: job.posted_date.clone(),
            links,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyGroup {
    pub keyword: String,
    pub companies: Vec<String>,
}

pub fn render_job_cards(state: &SessionState) -> Vec<JobCard> {
    state.jobs().iter().map(JobCard::from).collect()
}

/// Keyword groups in service order; groups without companies are dropped.
pub fn render_company_groups(state: &SessionState) -> Vec<CompanyGroup> {
    state
        .companies_by_keyword()
        .iter()
        .filter(|(_, companies)| !companies.is_empty())
        .map(|(keyword, companies)| CompanyGroup {
            keyword: keyword.to_string(),
            companies: companies.to_vec(),
        })
        .collect()
}

/// One line describing where the session stands.
pub fn summarize(state: &SessionState) -> String {
    match state.status() {
        SearchStatus::Idle => IDLE_HINT.to_string(),
        SearchStatus::Searching => match state.last_keywords() {
            Some(keywords) => format!("Searching for {keywords}..."),
            None => "Searching...".to_string(),
        },
        SearchStatus::Success => {
            let jobs = state.jobs().len();
            let mut keywords: Vec<&str> = state.jobs().iter().map(|j| j.keyword.as_str()).collect();
            keywords.sort_unstable();
            keywords.dedup();

            let mut line = format!(
                "Found {jobs} {} across {} {}",
                plural(jobs, "job", "jobs"),
                keywords.len(),
                plural(keywords.len(), "keyword", "keywords"),
            );
            if let Some(at) = state.completed_at() {
                line.push_str(&format!(" ({} UTC)", at.format("%H:%M:%S")));
            }
            line
        }
        SearchStatus::Error => state
            .last_error_message()
            .unwrap_or_else(|| "Search failed".to_string()),
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
