//! Backend commands queued from UI to backend worker.

use client_core::PendingSearch;

pub enum BackendCommand {
    Search(PendingSearch),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
        }
    }
}
