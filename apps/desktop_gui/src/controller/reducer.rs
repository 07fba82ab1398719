//! Folds backend events into the catalog controller and the status line.

use client_core::{ApplyOutcome, CatalogController};

use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub text: String,
    pub error: Option<UiError>,
}

impl StatusLine {
    pub fn report(&mut self, error: UiError) {
        self.text = error.headline().to_string();
        self.error = Some(error);
    }
}

pub fn apply_ui_event(controller: &mut CatalogController, status: &mut StatusLine, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            status.text = message;
        }
        UiEvent::PageFetched { request, result } => {
            match controller.apply_page_result(request, result) {
                ApplyOutcome::Applied => {
                    status.error = None;
                    status.text = format!(
                        "Page {} of {} ({} artworks)",
                        controller.page(),
                        controller.total_pages(),
                        controller.total_records()
                    );
                }
                ApplyOutcome::Failed => {
                    if let Some(failure) = controller.last_error() {
                        status.report(UiError::from_message(
                            UiErrorContext::LoadPage,
                            format!("page {}: {}", failure.page, failure.message),
                        ));
                    }
                }
                ApplyOutcome::Stale => {}
            }
        }
        UiEvent::Error(err) => {
            // A worker that never started will not answer the request already queued.
            if err.context() == UiErrorContext::BackendStartup {
                controller.fail_pending(err.message());
            }
            status.report(err);
        }
    }
}
