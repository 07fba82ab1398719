//! Selection and pagination state for the artworks listing.
//!
//! The controller is sans-IO: `load_page` hands out a [`PageRequest`], whoever owns the network
//! performs it, and the outcome comes back through `apply_page_result`. Only the response to the
//! most recently issued request is applied.

use shared::{
    domain::{Artwork, ArtworkId},
    protocol::ArtworkPage,
};
use tracing::{debug, info, warn};

use crate::{
    pagination::{clamp_page, page_window, total_pages, PagerConfig},
    selection::SelectionSet,
    ArtworkFetcher, FetchError, FetchFailure,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    Stale,
}

/// Everything the render layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub rows: Vec<Artwork>,
    pub loading: bool,
    pub selected_ids_on_page: Vec<ArtworkId>,
    pub page: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub page_window: Vec<u32>,
    pub selected_count: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub last_error: Option<FetchFailure>,
}

impl ViewState {
    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selected_ids_on_page.contains(&id)
    }
}

#[derive(Debug)]
pub struct CatalogController {
    config: PagerConfig,
    page: u32,
    loaded_page: u32,
    total_records: u64,
    rows: Vec<Artwork>,
    selection: SelectionSet,
    phase: FetchPhase,
    latest_seq: u64,
    last_error: Option<FetchFailure>,
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}

impl CatalogController {
    pub fn new(config: PagerConfig) -> Self {
        Self {
            config,
            page: 1,
            loaded_page: 1,
            total_records: 0,
            rows: Vec::new(),
            selection: SelectionSet::new(),
            phase: FetchPhase::Idle,
            latest_seq: 0,
            last_error: None,
        }
    }

    pub fn config(&self) -> PagerConfig {
        self.config
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_records, self.config.page_size)
    }

    pub fn rows(&self) -> &[Artwork] {
        &self.rows
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    pub fn last_error(&self) -> Option<&FetchFailure> {
        self.last_error.as_ref()
    }

    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn selected_ids(&self) -> Vec<ArtworkId> {
        self.selection.sorted_ids()
    }

    pub fn selection_view(&self) -> Vec<&Artwork> {
        self.selection.view_of(&self.rows)
    }

    pub fn page_window(&self) -> Vec<u32> {
        page_window(self.page, self.total_pages(), self.config.page_links)
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Starts loading `requested`, clamped to the known page range.
    ///
    /// A request for the page already shown is still issued and acts as a refresh.
    pub fn load_page(&mut self, requested: i64) -> PageRequest {
        let total_pages = self.total_pages();
        let page = clamp_page(requested, total_pages);
        self.latest_seq += 1;
        self.page = page;
        self.phase = FetchPhase::Loading;

        let request = PageRequest {
            seq: self.latest_seq,
            page,
            limit: self.config.page_size,
        };
        info!(
            requested,
            page,
            total_pages,
            seq = request.seq,
            "requesting artworks page"
        );
        request
    }

    pub fn refresh(&mut self) -> PageRequest {
        self.load_page(i64::from(self.page))
    }

    pub fn go_first(&mut self) -> PageRequest {
        self.load_page(1)
    }

    pub fn go_previous(&mut self) -> PageRequest {
        self.load_page(i64::from(self.page) - 1)
    }

    pub fn go_next(&mut self) -> PageRequest {
        self.load_page(i64::from(self.page) + 1)
    }

    pub fn go_last(&mut self) -> PageRequest {
        self.load_page(i64::from(self.total_pages()))
    }

    pub fn apply_page_result(
        &mut self,
        request: PageRequest,
        result: Result<ArtworkPage, FetchError>,
    ) -> ApplyOutcome {
        if request.seq != self.latest_seq {
            debug!(
                seq = request.seq,
                latest_seq = self.latest_seq,
                page = request.page,
                "discarding response for superseded page request"
            );
            return ApplyOutcome::Stale;
        }

        self.phase = FetchPhase::Idle;
        match result {
            Ok(artworks) => {
                self.rows = artworks.rows;
                self.total_records = artworks.total_records;
                self.loaded_page = request.page;
                self.page = request.page;
                self.last_error = None;
                info!(
                    page = request.page,
                    rows = self.rows.len(),
                    total_records = self.total_records,
                    selected_on_page = self.selection_view().len(),
                    "artworks page loaded"
                );
                ApplyOutcome::Applied
            }
            Err(err) => {
                self.record_failure(request, err.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    /// Ends `request` as failed without a fetch result, e.g. when it never reached a fetcher.
    pub fn fail_request(
        &mut self,
        request: PageRequest,
        message: impl Into<String>,
    ) -> ApplyOutcome {
        if request.seq != self.latest_seq {
            return ApplyOutcome::Stale;
        }
        self.phase = FetchPhase::Idle;
        self.record_failure(request, message.into());
        ApplyOutcome::Failed
    }

    /// Ends whatever request is still in flight as failed. Returns `Stale` when nothing is pending.
    pub fn fail_pending(&mut self, message: impl Into<String>) -> ApplyOutcome {
        if !self.is_loading() {
            return ApplyOutcome::Stale;
        }
        let request = PageRequest {
            seq: self.latest_seq,
            page: self.page,
            limit: self.config.page_size,
        };
        self.fail_request(request, message)
    }

    fn record_failure(&mut self, request: PageRequest, message: String) {
        warn!(
            page = request.page,
            seq = request.seq,
            error = %message,
            "failed to load artworks page; keeping previous rows"
        );
        self.page = self.loaded_page;
        self.last_error = Some(FetchFailure {
            page: request.page,
            message,
        });
    }

    pub async fn load_page_with<F>(&mut self, fetcher: &F, requested: i64) -> ApplyOutcome
    where
        F: ArtworkFetcher + ?Sized,
    {
        let request = self.load_page(requested);
        let result = fetcher.fetch_page(request.page, request.limit).await;
        self.apply_page_result(request, result)
    }

    /// Replaces the selection for the visible rows with `new_page_selection`.
    ///
    /// The render layer reports the complete desired state of the page, so every visible id is
    /// cleared first and the reported rows are added back.
    pub fn toggle_selection_for_page(&mut self, new_page_selection: &[Artwork]) {
        self.selection.remove_all(&self.rows);
        self.selection.insert_all(new_page_selection);
        debug!(
            page = self.page,
            selected_on_page = new_page_selection.len(),
            selected_total = self.selection.len(),
            "page selection replaced"
        );
    }

    pub fn select_all_on_page(&mut self) {
        self.selection.insert_all(&self.rows);
    }

    pub fn deselect_all_on_page(&mut self) {
        self.selection.remove_all(&self.rows);
    }

    /// Adds the first `n` visible rows to the selection. `None` and non-positive counts are
    /// ignored; rows already selected beyond the first `n` stay selected.
    pub fn apply_custom_select(&mut self, n: Option<i64>) {
        let Some(n) = n.filter(|n| *n > 0) else {
            return;
        };
        let count = usize::try_from(n)
            .unwrap_or(usize::MAX)
            .min(self.rows.len());
        self.selection.insert_all(self.rows.iter().take(count));
        debug!(
            requested = n,
            applied = count,
            selected_total = self.selection.len(),
            "custom select applied"
        );
    }

    pub fn snapshot(&self) -> ViewState {
        ViewState {
            rows: self.rows.clone(),
            loading: self.is_loading(),
            selected_ids_on_page: self.selection_view().iter().map(|row| row.id).collect(),
            page: self.page,
            total_pages: self.total_pages(),
            total_records: self.total_records,
            page_window: self.page_window(),
            selected_count: self.selected_count(),
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
            last_error: self.last_error.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
