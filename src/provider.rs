//! The location-provider seam and a JSON-lines implementation of it.
use crate::error::TrackerError;
use crate::location::PositionSample;
use crate::tracker::LocationListener;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::runtime::Handle;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A notification pushed by a location provider.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderEvent {
    Location(PositionSample),
    StatusChanged {
        provider: String,
        satellites: Option<String>,
    },
    ProviderEnabled {
        provider: String,
    },
    ProviderDisabled {
        provider: String,
    },
}

/// Source of raw position samples.
///
/// While subscribed, the provider delivers every sample it sees to the
/// listener, with no minimum time or distance between updates.
pub trait LocationProvider: Send + 'static {
    fn request_updates(
        &mut self,
        provider: &str,
        listener: LocationListener,
    ) -> Result<(), TrackerError>;

    fn remove_updates(&mut self) -> Result<(), TrackerError>;
}

/// Reads [`ProviderEvent`]s, one JSON object per line, from an async reader.
///
/// Lines are only consumed while subscribed; a later subscription continues
/// where the previous one stopped. Malformed lines are logged and skipped.
pub struct JsonLinesProvider<R> {
    lines: Arc<Mutex<Lines<BufReader<R>>>>,
    task: Option<JoinHandle<()>>,
    ended: Arc<watch::Sender<bool>>,
}

impl<R> JsonLinesProvider<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        let (ended, _) = watch::channel(false);
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(reader).lines())),
            task: None,
            ended: Arc::new(ended),
        }
    }

    /// Resolves to `true` once the reader hit end of input or failed.
    pub fn input_ended(&self) -> watch::Receiver<bool> {
        self.ended.subscribe()
    }
}

impl<R> LocationProvider for JsonLinesProvider<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    fn request_updates(
        &mut self,
        provider: &str,
        listener: LocationListener,
    ) -> Result<(), TrackerError> {
        let runtime = Handle::try_current()?;
        if let Some(task) = self.task.take() {
            task.abort();
        }
        info!("Requesting location updates from {provider}");

        let lines = Arc::clone(&self.lines);
        let ended = Arc::clone(&self.ended);
        self.task = Some(runtime.spawn(async move {
            loop {
                // `next_line` is cancel safe, so aborting here loses no input.
                let line = lines.lock().await.next_line().await;
                match line {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => match serde_json::from_str::<ProviderEvent>(&line) {
                        Ok(event) => listener.dispatch(event),
                        Err(e) => warn!("Skipping malformed location line: {e}"),
                    },
                    Ok(None) => {
                        info!("Location input ended");
                        break;
                    }
                    Err(e) => {
                        warn!("Could not read location input: {e}");
                        break;
                    }
                }
            }
            ended.send_replace(true);
        }));
        Ok(())
    }

    fn remove_updates(&mut self) -> Result<(), TrackerError> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        Ok(())
    }
}

impl<R> Drop for JsonLinesProvider<R> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
