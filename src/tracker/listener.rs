use crate::location::{PositionSample, is_different};
use crate::provider::ProviderEvent;
use crate::tracker::state::Shared;
use std::sync::Arc;
use tracing::{debug, info};

/// Callback handle a [`crate::provider::LocationProvider`] pushes its events into.
///
/// It may be cloned and called from any thread.
#[derive(Debug, Clone)]
pub struct LocationListener {
    shared: Arc<Shared>,
}

impl LocationListener {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub fn dispatch(&self, event: ProviderEvent) {
        match event {
            ProviderEvent::Location(sample) => self.on_location_changed(sample),
            ProviderEvent::StatusChanged {
                provider,
                satellites,
            } => self.on_status_changed(&provider, satellites.as_deref()),
            ProviderEvent::ProviderEnabled { provider } => self.on_provider_enabled(&provider),
            ProviderEvent::ProviderDisabled { provider } => self.on_provider_disabled(&provider),
        }
    }

    /// Keeps `sample` if it moved beyond the tolerance from the last known fix.
    ///
    /// The first accepted sample arms the upload scheduler; later ones never do.
    pub fn on_location_changed(&self, sample: PositionSample) {
        let first_fix = {
            let mut state = self.shared.lock_state();
            if let Some(last) = &state.last_known
                && !is_different(&sample, last)
            {
                debug!("Ignoring sample within tolerance of the last known location");
                return;
            }
            state.history.append(sample.clone());
            state.last_known = Some(sample.clone());
            !std::mem::replace(&mut state.got_first_fix, true)
        };

        self.shared.observer.emit(&sample.display_line());
        if first_fix {
            info!("First fix acquired, activating uploads");
            self.shared.first_fix.notify_one();
        }
    }

    pub fn on_status_changed(&self, provider: &str, satellites: Option<&str>) {
        info!(
            "Received notification of status changed: {provider} {}",
            satellites.unwrap_or("null")
        );
    }

    pub fn on_provider_enabled(&self, provider: &str) {
        info!("Received notification that location provider {provider} has been enabled");
    }

    pub fn on_provider_disabled(&self, provider: &str) {
        info!("Received notification that location provider {provider} has been disabled");
    }
}
