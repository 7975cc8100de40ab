//! Glue between the window and the backend: validates input, dispatches one
//! async request per click and applies finished requests to the status region.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info, warn};

use crate::downloader::{DownloadBackend, file_name_for};
use crate::error::{Error, Result};
use crate::model::{DownloadRequest, DownloadedMedia, MediaFormat, RequestState, StatusRegion};
use crate::saver::FileSaver;
use crate::validation::validate_url;

pub const SUCCESS_MESSAGE: &str =
    "Download initiated! Your browser should prompt you to save the file.";

/// A request whose network round trip has resolved
struct Completion {
    request: DownloadRequest,
    result: Result<DownloadedMedia>,
}

pub struct DownloadController {
    backend: Arc<dyn DownloadBackend>,
    runtime: Handle,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    status: StatusRegion,
    state: RequestState,
}

impl DownloadController {
    pub fn new(backend: Arc<dyn DownloadBackend>, runtime: Handle) -> Self {
        let (completions_tx, completions_rx) = unbounded_channel();
        Self {
            backend,
            runtime,
            completions_tx,
            completions_rx,
            status: StatusRegion::default(),
            state: RequestState::Idle,
        }
    }

    pub fn status(&self) -> &StatusRegion {
        &self.status
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Handles a button click.
    ///
    /// Invalid input is reported in the status region and returned; the
    /// backend is not contacted. Clicking again while a request is running
    /// starts a second, independent request.
    pub fn submit(&mut self, raw_url: &str, format: MediaFormat) -> Result<()> {
        let url = validate_url(raw_url).inspect_err(|err| {
            warn!(input = raw_url, error = %err, "rejected download input");
            self.status.show_error(failure_text(err));
        })?;

        let request = DownloadRequest::new(url, format);
        self.status.show_info(format!(
            "Initiating download for {} from {}... Please wait.",
            request.format, request.url
        ));
        self.state = RequestState::InFlight;

        let backend = Arc::clone(&self.backend);
        let completions_tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = backend.fetch(&request).await;
            // Receiver only goes away when the window closes.
            let _ = completions_tx.send(Completion { request, result });
        });
        Ok(())
    }

    /// Applies every request that finished since the last call. Never blocks
    /// on the network; `saver` may block on a dialog.
    pub fn poll(&mut self, saver: &dyn FileSaver) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.complete(completion, saver);
            applied += 1;
        }
        applied
    }

    fn complete(&mut self, completion: Completion, saver: &dyn FileSaver) {
        let Completion { request, result } = completion;
        debug!(url = %request.url, format = %request.format, ok = result.is_ok(), "request resolved");

        let saved = result.and_then(|media| {
            let file_name = file_name_for(request.format, media.content_type.as_deref());
            saver.save(&file_name, &media.bytes)
        });

        match saved {
            Ok(path) => {
                info!(url = %request.url, path = %path.display(), "download completed");
                self.status.show_success(SUCCESS_MESSAGE);
                self.state = RequestState::Succeeded(path);
            }
            Err(err) => {
                let message = failure_text(&err);
                warn!(url = %request.url, error = %err, "download failed");
                self.status.show_error(message.clone());
                self.state = RequestState::Failed(message);
            }
        }
    }
}

/// Status text for a failed attempt. Input problems are shown as-is; anything
/// that happened after dispatch gets the `Download failed: ` prefix.
fn failure_text(err: &Error) -> String {
    if err.is_local() {
        err.to_string()
    } else {
        format!("Download failed: {err}")
    }
}
