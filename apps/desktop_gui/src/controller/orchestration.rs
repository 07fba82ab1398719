//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{CatalogController, PageRequest};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext},
    reducer::StatusLine,
};

/// Queues `cmd` for the backend worker. On failure the returned message explains why.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend command processor disconnected (possible startup/runtime failure); restart the viewer"
                .to_string(),
        ),
    }
}

/// Hands a page request issued by the controller to the backend worker, failing it on the spot
/// when the worker cannot take it.
pub fn request_page(
    controller: &mut CatalogController,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut StatusLine,
    request: PageRequest,
) {
    if let Err(reason) = dispatch_backend_command(cmd_tx, BackendCommand::FetchPage(request)) {
        controller.fail_request(request, reason.clone());
        status.report(UiError::from_message(UiErrorContext::LoadPage, reason));
    }
}

#[cfg(test)]
mod tests {
    use client_core::PageRequest;
    use crossbeam_channel::bounded;

    use super::*;

    fn fetch(seq: u64) -> BackendCommand {
        BackendCommand::FetchPage(PageRequest {
            seq,
            page: 1,
            limit: 10,
        })
    }

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (cmd_tx, cmd_rx) = bounded(1);
        assert!(dispatch_backend_command(&cmd_tx, fetch(1)).is_ok());

        let full = dispatch_backend_command(&cmd_tx, fetch(2)).expect_err("queue full");
        assert!(full.contains("full"));

        drop(cmd_rx);
        let gone = dispatch_backend_command(&cmd_tx, fetch(3)).expect_err("disconnected");
        assert!(gone.contains("disconnected"));
    }

    #[test]
    fn undeliverable_page_request_stops_loading() {
        let (cmd_tx, cmd_rx) = bounded(4);
        drop(cmd_rx);
        let mut controller = CatalogController::default();
        let mut status = StatusLine::default();

        let request = controller.load_page(1);
        request_page(&mut controller, &cmd_tx, &mut status, request);

        assert!(!controller.is_loading());
        assert!(controller.last_error().is_some());
        assert!(status.error.is_some());
    }

    #[test]
    fn delivered_page_request_reaches_the_queue() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut controller = CatalogController::default();
        let mut status = StatusLine::default();

        let request = controller.load_page(1);
        request_page(&mut controller, &cmd_tx, &mut status, request);

        assert_eq!(cmd_rx.try_recv().ok(), Some(BackendCommand::FetchPage(request)));
        assert!(controller.is_loading());
        assert!(status.error.is_none());
    }
}
