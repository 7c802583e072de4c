//! In-memory collaborators for unit tests.
use crate::error::{TrackerError, UploadError};
use crate::location::PositionSample;
use crate::provider::LocationProvider;
use crate::tracker::LocationListener;
use crate::upload::UploadTransport;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub url: Option<String>,
    pub body: String,
}

/// Records every POST. Fails like the HTTP transport when no URL is set.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    posts: Arc<Mutex<Vec<Post>>>,
}

impl RecordingTransport {
    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }
}

impl UploadTransport for RecordingTransport {
    async fn post_form(&self, url: Option<&str>, body: &str) -> Result<(), UploadError> {
        self.posts.lock().unwrap().push(Post {
            url: url.map(str::to_string),
            body: body.to_string(),
        });
        url.map(|_| ()).ok_or(UploadError::MissingUrl)
    }
}

/// Holds every POST open until the test calls [`GatedTransport::release`].
#[derive(Debug, Clone, Default)]
pub struct GatedTransport {
    entered: Arc<Notify>,
    gate: Arc<Notify>,
    completed: Arc<AtomicUsize>,
}

impl GatedTransport {
    /// Resolves once a POST is blocked on the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one blocked (or the next) POST finish.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl UploadTransport for GatedTransport {
    async fn post_form(&self, _url: Option<&str>, _body: &str) -> Result<(), UploadError> {
        self.entered.notify_one();
        self.gate.notified().await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Provider whose samples are pushed by the test through a [`ProviderFeed`].
#[derive(Debug, Default)]
pub struct PushProvider {
    listener: Arc<Mutex<Option<LocationListener>>>,
    subscriptions: Arc<Mutex<Vec<String>>>,
}

/// Test-side handle of a [`PushProvider`].
#[derive(Debug, Clone)]
pub struct ProviderFeed {
    listener: Arc<Mutex<Option<LocationListener>>>,
    subscriptions: Arc<Mutex<Vec<String>>>,
}

impl PushProvider {
    pub fn new() -> (Self, ProviderFeed) {
        let provider = Self::default();
        let feed = ProviderFeed {
            listener: Arc::clone(&provider.listener),
            subscriptions: Arc::clone(&provider.subscriptions),
        };
        (provider, feed)
    }
}

impl ProviderFeed {
    /// Delivers `sample` if the tracker is currently subscribed.
    pub fn push(&self, sample: PositionSample) -> bool {
        let listener = self.listener.lock().unwrap().clone();
        match listener {
            Some(listener) => {
                listener.on_location_changed(sample);
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.listener.lock().unwrap().is_some()
    }

    /// Provider names passed to every `request_updates` call so far.
    pub fn subscriptions(&self) -> Vec<String> {
        self.subscriptions.lock().unwrap().clone()
    }
}

impl LocationProvider for PushProvider {
    fn request_updates(
        &mut self,
        provider: &str,
        listener: LocationListener,
    ) -> Result<(), TrackerError> {
        self.subscriptions.lock().unwrap().push(provider.to_string());
        *self.listener.lock().unwrap() = Some(listener);
        Ok(())
    }

    fn remove_updates(&mut self) -> Result<(), TrackerError> {
        *self.listener.lock().unwrap() = None;
        Ok(())
    }
}

pub fn sample(latitude: f64, longitude: f64) -> PositionSample {
    PositionSample::builder()
        .latitude(latitude)
        .longitude(longitude)
        .build()
}
