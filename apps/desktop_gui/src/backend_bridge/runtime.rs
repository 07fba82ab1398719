//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ArtworkFetcher, HttpArtworkFetcher, ViewerSettings};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ViewerSettings) {
    let fetcher = Arc::new(HttpArtworkFetcher::new(&settings));
    spawn_backend_thread(cmd_rx, ui_tx, fetcher);
}

pub fn spawn_backend_thread(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    fetcher: Arc<dyn ArtworkFetcher>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        // Requests are not queued behind each other; each fetch runs as its own task and the
        // controller drops responses that were superseded while in flight.
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::FetchPage(request) => {
                    let fetcher = Arc::clone(&fetcher);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let result = fetcher.fetch_page(request.page, request.limit).await;
                        match ui_tx.try_send(UiEvent::PageFetched { request, result }) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => tracing::warn!(
                                seq = request.seq,
                                page = request.page,
                                "ui event queue full; dropping artworks page"
                            ),
                            Err(TrySendError::Disconnected(_)) => tracing::debug!(
                                seq = request.seq,
                                "ui closed before artworks page arrived"
                            ),
                        }
                    });
                }
            }
        }

        tracing::info!("backend command queue closed; shutting down worker");
        runtime.shutdown_background();
    })
}
