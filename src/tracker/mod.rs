//! The tracking service: provider subscription, sample filtering and upload lifecycle.
mod listener;
pub(crate) mod state;

pub use listener::LocationListener;

use crate::config::TrackerConfig;
use crate::error::{ConfigError, TrackerError};
use crate::location::PositionSample;
use crate::observer::Observer;
use crate::provider::LocationProvider;
use crate::upload::{UploadScheduler, UploadTransport};
use bon::bon;
use state::Shared;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Uninitialized,
    Initialized,
    Started,
    Stopped,
}

/// A long-lived background service a host starts and stops.
pub trait Service {
    /// Prepares the service. Called exactly once, before `start`.
    fn init(&mut self) -> Result<(), TrackerError>;
    /// Starts the service. Starting a started service does nothing.
    fn start(&mut self) -> Result<(), TrackerError>;
    /// Stops the service. Stopping a stopped service does nothing.
    fn stop(&mut self) -> Result<(), TrackerError>;
    fn status(&self) -> ServiceStatus;
}

/// Samples positions from a [`LocationProvider`] and uploads significant ones.
///
/// Raw samples that moved less than the tolerance since the last accepted one
/// are dropped. Accepted samples are appended to the history and become the
/// last known location. The first accepted sample starts the upload
/// scheduler, which keeps running across `stop`/`start` until
/// [`Tracker::shutdown`].
///
/// ```rust,no_run
/// # use gps_tracker::{HttpTransport, JsonLinesProvider, Observer, Service, Tracker, TrackerConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), gps_tracker::TrackerError> {
/// let mut tracker = Tracker::builder()
///     .provider(JsonLinesProvider::new(tokio::io::stdin()))
///     .transport(HttpTransport::new())
///     .config(TrackerConfig {
///         upload_url: Some("http://example.com/track".into()),
///         ..TrackerConfig::default()
///     })
///     .observer(Observer::new(|message| println!("{message}")))
///     .build();
/// tracker.init()?;
/// tracker.start()?;
/// # Ok(())
/// # }
/// ```
pub struct Tracker<P, T> {
    provider: P,
    transport: Arc<T>,
    shared: Arc<Shared>,
    status: ServiceStatus,
    listener: Option<LocationListener>,
    scheduler: Option<UploadScheduler>,
}

#[bon]
impl<P: LocationProvider, T: UploadTransport> Tracker<P, T> {
    #[builder]
    pub fn new(
        provider: P,
        transport: T,
        #[builder(default)] config: TrackerConfig,
        #[builder(default)] observer: Observer,
    ) -> Self {
        Self {
            provider,
            transport: Arc::new(transport),
            shared: Arc::new(Shared::new(config, observer)),
            status: ServiceStatus::Uninitialized,
            listener: None,
            scheduler: None,
        }
    }
}

impl<P: LocationProvider, T: UploadTransport> Tracker<P, T> {
    /// Discards the location history, e.g. when the host runs low on memory.
    ///
    /// The last known and last uploaded samples and the running state are kept.
    pub fn cleanup(&self) {
        self.shared.lock_state().history.clear();
    }

    pub fn last_known_location(&self) -> Option<PositionSample> {
        self.shared.lock_state().last_known.clone()
    }

    pub fn last_uploaded_location(&self) -> Option<PositionSample> {
        self.shared.lock_state().last_uploaded.clone()
    }

    /// Snapshot of every accepted sample, oldest first.
    pub fn history(&self) -> Vec<PositionSample> {
        self.shared.lock_state().history.to_vec()
    }

    pub fn last_known_report(&self) -> Option<String> {
        self.last_known_location()
            .map(|sample| format!("Last Known Location:\n{}", sample.display_line()))
    }

    pub fn config(&self) -> TrackerConfig {
        self.shared.config()
    }

    /// Applies a settings change. It is visible to the next upload tick.
    pub fn apply_setting(&self, key: &str, value: &str) -> Result<(), TrackerError> {
        self.shared
            .update_config(|config| config.apply_setting(key, value))?;
        Ok(())
    }

    pub fn set_upload_url(&self, url: Option<String>) {
        self.shared.update_config(|config| config.upload_url = url);
    }

    pub fn set_upload_interval(&self, interval: Duration) -> Result<(), TrackerError> {
        if interval.is_zero() {
            return Err(ConfigError::InvalidSetting {
                key: crate::config::UPLOAD_INTERVAL_KEY.to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        self.shared
            .update_config(|config| config.upload_interval = interval);
        Ok(())
    }

    pub fn set_device_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.shared.update_config(|config| config.device_name = name);
    }

    /// The listener handed to the provider, available after `init`.
    pub fn listener(&self) -> Option<LocationListener> {
        self.listener.clone()
    }

    /// Upload ticks fired so far; zero until the first fix.
    pub fn upload_ticks(&self) -> u64 {
        self.scheduler.as_ref().map_or(0, UploadScheduler::ticks)
    }

    /// Stops the service and cancels all future upload ticks.
    pub fn shutdown(&mut self) -> Result<(), TrackerError> {
        if self.status != ServiceStatus::Uninitialized {
            self.stop()?;
        }
        if let Some(scheduler) = &self.scheduler {
            scheduler.shutdown();
        }
        info!("GPS Tracker exiting now");
        Ok(())
    }

    /// Waits until the upload task has exited after [`shutdown`](Self::shutdown),
    /// letting a POST already in flight finish.
    pub async fn wait_for_uploads(&mut self) {
        if let Some(scheduler) = &mut self.scheduler {
            scheduler.wait().await;
        }
    }
}

impl<P: LocationProvider, T: UploadTransport> Service for Tracker<P, T> {
    fn init(&mut self) -> Result<(), TrackerError> {
        if self.status != ServiceStatus::Uninitialized {
            return Err(TrackerError::AlreadyInitialized);
        }
        let runtime = Handle::try_current()?;

        self.listener = Some(LocationListener::new(Arc::clone(&self.shared)));
        self.scheduler = Some(UploadScheduler::spawn(
            &runtime,
            Arc::clone(&self.shared),
            Arc::clone(&self.transport),
        ));
        self.shared
            .observer
            .emit("Please wait while a GPS fix is acquired...");
        info!(
            "Using locationProvider={}",
            self.shared.config().location_provider
        );
        self.status = ServiceStatus::Initialized;
        Ok(())
    }

    fn start(&mut self) -> Result<(), TrackerError> {
        match self.status {
            ServiceStatus::Started => return Ok(()),
            ServiceStatus::Uninitialized => return Err(TrackerError::NotInitialized),
            ServiceStatus::Initialized | ServiceStatus::Stopped => {}
        }
        let listener = self.listener.clone().ok_or(TrackerError::NotInitialized)?;
        let provider = self.shared.config().location_provider;
        self.provider.request_updates(&provider, listener)?;

        info!("GPS Tracker Service has been started");
        self.shared.observer.emit("GPS Tracker Service has started");
        self.status = ServiceStatus::Started;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TrackerError> {
        match self.status {
            ServiceStatus::Stopped => return Ok(()),
            ServiceStatus::Uninitialized => return Err(TrackerError::NotInitialized),
            ServiceStatus::Initialized | ServiceStatus::Started => {}
        }
        self.provider.remove_updates()?;

        info!("GPS Tracker Service has been stopped");
        self.shared.observer.emit("GPS Tracker Service has stopped");
        self.status = ServiceStatus::Stopped;
        Ok(())
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }
}
