//! Job search client core: session state, the search controller that drives
//! it, the HTTP transport to the job search service, and the read-only views
//! the front ends render.

pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod transport;
pub mod view;

pub use config::{load_settings, ConfigError, Settings};
pub use controller::{PendingSearch, SearchController};
pub use error::{SearchError, SearchErrorKind};
pub use session::{SearchStatus, SessionState};
pub use transport::{HttpSearchTransport, SearchTransport, TransportSetupError};
pub use view::{
    render_company_groups, render_job_cards, summarize, ActionLink, CompanyGroup, JobCard,
    LinkKind,
};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
