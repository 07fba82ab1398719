//! Backend commands queued from UI to backend worker.

use client_core::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    FetchPage(PageRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchPage(_) => "fetch_page",
        }
    }
}
