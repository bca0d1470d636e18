//! Fixtures shared by the client_core test modules.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use axum::Router;
use shared::protocol::{
    CompanyGroups, JobPosting, ScrapeJobsRequest, ScrapeJobsResponse, SCRAPE_JOBS_PATH,
};
use tokio::net::TcpListener;
use url::Url;

use crate::{error::SearchError, transport::SearchTransport};

pub(crate) async fn spawn_service(app: Router) -> Url {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}{SCRAPE_JOBS_PATH}")).expect("endpoint url")
}

/// An endpoint nothing is listening on.
pub(crate) async fn dead_endpoint() -> Url {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}{SCRAPE_JOBS_PATH}")).expect("endpoint url")
}

pub(crate) fn posting(title: &str, company: &str, keyword: &str) -> JobPosting {
    JobPosting {
        title: title.to_string(),
        company: company.to_string(),
        location: "Remote".to_string(),
        keyword: keyword.to_string(),
        job_link: None,
        company_link: None,
        salary: None,
        posted_date: None,
    }
}

pub(crate) fn response(jobs: Vec<JobPosting>, groups: &[(&str, &[&str])]) -> ScrapeJobsResponse {
    ScrapeJobsResponse {
        jobs,
        companies_by_keyword: groups
            .iter()
            .map(|(keyword, companies)| (*keyword, companies.iter().copied()))
            .collect::<CompanyGroups>(),
    }
}

/// Replays scripted results in order and records every request it receives.
pub(crate) struct ScriptedTransport {
    results: Mutex<VecDeque<Result<ScrapeJobsResponse, SearchError>>>,
    requests: Mutex<Vec<ScrapeJobsRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(
        results: impl IntoIterator<Item = Result<ScrapeJobsResponse, SearchError>>,
    ) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ScrapeJobsRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl SearchTransport for ScriptedTransport {
    async fn scrape_jobs(
        &self,
        request: &ScrapeJobsRequest,
    ) -> Result<ScrapeJobsResponse, SearchError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.results
            .lock()
            .expect("results lock")
            .pop_front()
            .unwrap_or_else(|| Err(SearchError::Transport("no scripted result left".into())))
    }
}
