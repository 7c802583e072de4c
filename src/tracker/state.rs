use crate::config::TrackerConfig;
use crate::location::{LocationHistory, PositionSample};
use crate::observer::Observer;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Notify;

/// Slots written by the provider callback and read by the upload scheduler.
#[derive(Debug, Default)]
pub(crate) struct TrackingState {
    pub history: LocationHistory,
    pub last_known: Option<PositionSample>,
    pub last_uploaded: Option<PositionSample>,
    pub got_first_fix: bool,
}

/// State shared between the service, its listener and the upload task.
///
/// Every read or write of the tracking slots goes through the single `state`
/// lock. The lock is never held across an await point.
#[derive(Debug)]
pub(crate) struct Shared {
    state: Mutex<TrackingState>,
    config: RwLock<TrackerConfig>,
    pub observer: Observer,
    /// Wakes the upload scheduler on the first accepted fix.
    pub first_fix: Notify,
    /// Wakes a sleeping scheduler so it can pick up a new interval.
    pub config_changed: Notify,
}

impl Shared {
    pub fn new(config: TrackerConfig, observer: Observer) -> Self {
        Self {
            state: Mutex::new(TrackingState::default()),
            config: RwLock::new(config),
            observer,
            first_fix: Notify::new(),
            config_changed: Notify::new(),
        }
    }

    pub fn lock_state(&self) -> MutexGuard<'_, TrackingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> TrackerConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn upload_interval(&self) -> Duration {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upload_interval
    }

    pub fn update_config<R>(&self, update: impl FnOnce(&mut TrackerConfig) -> R) -> R {
        let result = {
            let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
            update(&mut config)
        };
        self.config_changed.notify_waiters();
        result
    }
}
