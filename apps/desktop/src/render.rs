//! Plain-text and JSON output for the terminal front end.

use std::io::{self, Write};

use client_core::{
    render_company_groups, render_job_cards, summarize, CompanyGroup, JobCard, SearchStatus,
    SessionState,
};
use serde::Serialize;

#[derive(Serialize)]
struct RenderedResults {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    company_groups: Vec<CompanyGroup>,
    jobs: Vec<JobCard>,
}

fn status_name(status: SearchStatus) -> &'static str {
    match status {
        SearchStatus::Idle => "idle",
        SearchStatus::Searching => "searching",
        SearchStatus::Success => "success",
        SearchStatus::Error => "error",
    }
}

pub fn write_json(state: &SessionState, out: &mut impl Write) -> io::Result<()> {
    let rendered = RenderedResults {
        status: status_name(state.status()),
        error: state.last_error_message(),
        company_groups: render_company_groups(state),
        jobs: render_job_cards(state),
    };
    serde_json::to_writer_pretty(&mut *out, &rendered)?;
    writeln!(out)
}

/// Company groups first, then the job cards. Failures go to `notice`.
pub fn write_text(
    state: &SessionState,
    out: &mut impl Write,
    notice: &mut impl Write,
) -> io::Result<()> {
    if state.status() == SearchStatus::Error {
        writeln!(notice, "! {}", summarize(state))?;
        return Ok(());
    }

    let groups = render_company_groups(state);
    if !groups.is_empty() {
        writeln!(out, "Companies Hiring by Keyword")?;
        for group in &groups {
            writeln!(out, "  {}: {}", group.keyword, group.companies.join(", "))?;
        }
        writeln!(out)?;
    }

    for (index, card) in render_job_cards(state).iter().enumerate() {
        write_card(index + 1, card, out)?;
    }

    writeln!(out, "{}", summarize(state))
}

fn write_card(number: usize, card: &JobCard, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "[{number}] {}", card.title)?;
    writeln!(out, "    {}", card.company)?;
    writeln!(out, "    Location: {}", card.location)?;
    writeln!(out, "    Keyword: {}", card.keyword)?;
    if let Some(salary) = &card.salary {
        writeln!(out, "    Salary: {salary}")?;
    }
    if let Some(posted) = &card.posted_date {
        writeln!(out, "    Posted: {posted}")?;
    }
    for link in &card.links {
        writeln!(out, "    {}: {}", link.kind.label(), link.url)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use client_core::{SearchController, SearchError};

    use super::*;

    fn run(result: Result<serde_json::Value, SearchError>) -> SearchController {
        let mut controller = SearchController::new();
        controller.update_keyword_input("python developer, react");
        let pending = controller.begin_search().expect("search dispatched");
        let parsed = result.map(|body| serde_json::from_value(body).expect("response body"));
        controller.complete_search(pending.generation, parsed);
        controller
    }

    fn render_text(controller: &SearchController) -> (String, String) {
        let mut out = Vec::new();
        let mut notice = Vec::new();
        write_text(controller.state(), &mut out, &mut notice).expect("render");
        (
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(notice).expect("utf8"),
        )
    }

    #[test]
    fn prints_groups_before_cards() {
        let controller = run(Ok(serde_json::json!({
            "jobs": [{
                "title": "Backend Eng",
                "company": "Acme",
                "location": "Remote",
                "keyword": "python developer",
                "job_link": "https://wellfound.com/jobs/1"
            }],
            "companies_by_keyword": {"python developer": ["Acme"], "react": []}
        })));

        let (out, notice) = render_text(&controller);
        assert!(notice.is_empty());

        let groups_at = out.find("Companies Hiring by Keyword").expect("groups header");
        let card_at = out.find("[1] Backend Eng").expect("card");
        assert!(groups_at < card_at);
        assert!(out.contains("  python developer: Acme"));
        assert!(!out.contains("react:"));
        assert!(out.contains("View Job: https://wellfound.com/jobs/1"));
        assert!(!out.contains("View Company"));
    }

    #[test]
    fn failures_go_to_notice_only() {
        let controller = run(Err(SearchError::Service {
            status: 500,
            detail: Some("scrape timeout".into()),
        }));

        let (out, notice) = render_text(&controller);
        assert!(out.is_empty());
        assert_eq!(notice, "! scrape timeout\n");
    }

    #[test]
    fn json_output_mirrors_both_views() {
        let controller = run(Ok(serde_json::json!({
            "jobs": [{
                "title": "Backend Eng",
                "company": "Acme",
                "location": "Remote",
                "keyword": "python developer"
            }],
            "companies_by_keyword": {"python developer": ["Acme"]}
        })));

        let mut out = Vec::new();
        write_json(controller.state(), &mut out).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");

        assert_eq!(value["status"], "success");
        assert_eq!(value["company_groups"][0]["keyword"], "python developer");
        assert_eq!(value["jobs"][0]["company"], "Acme");
        assert_eq!(value["jobs"][0]["links"], serde_json::json!([]));
        assert!(value.get("error").is_none());
    }
}
