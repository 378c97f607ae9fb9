use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{FetchError, Result};
use crate::hn_client::PageFetcher;
use crate::models::Page;
use crate::session::FetchRequest;

/// A finished fetch, tagged with what was asked for.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: Result<Page>,
}

/// Runs fetches on a worker thread and hands results back over a channel.
///
/// The UI thread calls [`Loader::poll`] once per frame; nothing here blocks
/// it. One fetch is in flight at a time, starting another drops the receiver
/// of the previous one so its result is discarded.
pub struct Loader {
    fetcher: Arc<dyn PageFetcher>,
    pending: Option<(FetchRequest, Receiver<FetchOutcome>)>,
}

impl Loader {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            pending: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn spawn(&mut self, request: FetchRequest) {
        if let Some((previous, _)) = self.pending.take() {
            debug!(key = %previous.key, page = previous.page, "dropping superseded fetch");
        }

        let fetcher = Arc::clone(&self.fetcher);
        let (tx, rx) = mpsc::channel();
        let job = request.clone();

        info!(key = %request.key, page = request.page, "fetching search page");
        thread::spawn(move || {
            let result = fetcher.fetch_page(&job.key, job.page);
            // The receiver is gone if the fetch was superseded or the app shut down.
            let _ = tx.send(FetchOutcome {
                request: job,
                result,
            });
        });

        self.pending = Some((request, rx));
    }

    /// Returns the outcome once the worker is done, `None` while it is still
    /// running or when nothing was spawned.
    pub fn poll(&mut self) -> Option<FetchOutcome> {
        let (_, rx) = self.pending.as_ref()?;
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                Some(log_outcome(outcome))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.take_disconnected(),
        }
    }

    /// Blocks up to `timeout` for the pending fetch.
    pub fn wait(&mut self, timeout: Duration) -> Option<FetchOutcome> {
        let (_, rx) = self.pending.as_ref()?;
        match rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.pending = None;
                Some(log_outcome(outcome))
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => self.take_disconnected(),
        }
    }

    fn take_disconnected(&mut self) -> Option<FetchOutcome> {
        let (request, _) = self.pending.take()?;
        warn!(key = %request.key, page = request.page, "fetch worker died");
        Some(FetchOutcome {
            request,
            result: Err(FetchError::Disconnected),
        })
    }
}

fn log_outcome(outcome: FetchOutcome) -> FetchOutcome {
    match &outcome.result {
        Ok(page) => info!(
            key = %outcome.request.key,
            page = page.index,
            hits = page.hits.len(),
            "search page loaded"
        ),
        Err(error) => warn!(
            key = %outcome.request.key,
            page = outcome.request.page,
            %error,
            "search page failed"
        ),
    }
    outcome
}
