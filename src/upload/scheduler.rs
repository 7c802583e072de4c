use crate::error::UploadError;
use crate::location::is_different;
use crate::tracker::state::Shared;
use crate::upload::record::{form_body, upload_record};
use crate::upload::transport::UploadTransport;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// What a single upload tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No sample has been accepted yet.
    NoSample,
    /// The last known sample is within tolerance of the last uploaded one.
    Unchanged,
    Uploaded,
    /// The transport failed. The sample still counts as uploaded.
    Failed,
}

/// Handle to the background task uploading the last known sample.
///
/// The task waits for the first accepted fix, then ticks immediately and every
/// configured interval after that, at a fixed rate. Shutting down cancels
/// future ticks; a tick already in flight runs to completion.
#[derive(Debug)]
pub struct UploadScheduler {
    shutdown: watch::Sender<bool>,
    ticks: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl UploadScheduler {
    pub(crate) fn spawn<T: UploadTransport>(
        runtime: &Handle,
        shared: Arc<Shared>,
        transport: Arc<T>,
    ) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let ticks = Arc::new(AtomicU64::new(0));
        let task = runtime.spawn(run(shared, transport, shutdown_rx, Arc::clone(&ticks)));
        Self {
            shutdown,
            ticks,
            task: Some(task),
        }
    }

    /// Number of ticks fired so far, including skipped ones.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the background task to exit, including a tick in flight.
    ///
    /// Only returns once [`shutdown`](Self::shutdown) was called.
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!("Upload scheduler task failed: {e}");
        }
    }
}

async fn run<T: UploadTransport>(
    shared: Arc<Shared>,
    transport: Arc<T>,
    mut shutdown: watch::Receiver<bool>,
    ticks: Arc<AtomicU64>,
) {
    tokio::select! {
        _ = shared.first_fix.notified() => {}
        _ = shutdown.changed() => return,
    }

    let mut deadline = Instant::now();
    loop {
        if *shutdown.borrow() {
            return;
        }
        let outcome = run_tick(&shared, transport.as_ref()).await;
        ticks.fetch_add(1, Ordering::Relaxed);
        debug!("Upload tick finished: {outcome:?}");

        let last_tick = deadline;
        loop {
            // Re-read on every wakeup so interval changes apply to the pending tick.
            deadline = last_tick + shared.upload_interval();
            tokio::select! {
                _ = sleep_until(deadline) => break,
                _ = shared.config_changed.notified() => continue,
                _ = shutdown.changed() => return,
            }
        }
    }
}

/// Uploads the last known sample unless it is missing or was already sent.
pub(crate) async fn run_tick<T: UploadTransport>(
    shared: &Shared,
    transport: &T,
) -> TickOutcome {
    let (current, last_uploaded) = {
        let state = shared.lock_state();
        (state.last_known.clone(), state.last_uploaded.clone())
    };
    let Some(sample) = current else {
        return TickOutcome::NoSample;
    };
    if let Some(uploaded) = &last_uploaded
        && !is_different(&sample, uploaded)
    {
        return TickOutcome::Unchanged;
    }

    let config = shared.config();
    let body = form_body(&upload_record(&config.device_name, &sample));
    let url = config.upload_url.as_deref();

    shared.observer.emit("Uploading Coordinates Now");
    let calling = format!("Calling URL: {}", url.unwrap_or("<not configured>"));
    info!("{calling}");
    shared.observer.emit(&calling);

    let outcome = match transport.post_form(url, &body).await {
        Ok(()) => TickOutcome::Uploaded,
        Err(e) => {
            let message = match &e {
                UploadError::Response(_) => format!("Could not fetch response: {e}"),
                _ => format!("Could not upload coordinates: {e}"),
            };
            warn!("{message}");
            shared.observer.emit(&message);
            TickOutcome::Failed
        }
    };

    // Failed uploads are marked too, so the same fix is never retried.
    shared.lock_state().last_uploaded = Some(sample);
    outcome
}
