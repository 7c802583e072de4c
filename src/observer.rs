//! Text sink for the status lines a host shows to its user.
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// Receives human-readable status and error messages from the tracker.
///
/// Cloning is cheap; every clone delivers to the same sink.
#[derive(Clone, Default)]
pub struct Observer {
    sink: Option<Sink>,
}

impl Observer {
    /// An observer calling `sink` for every message.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }

    /// An observer that drops every message.
    pub fn silent() -> Self {
        Self::default()
    }

    /// An observer forwarding messages into an unbounded channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let observer = Self::new(move |message| {
            // The host may have dropped the receiver; messages are best effort.
            let _ = tx.send(message.to_string());
        });
        (observer, rx)
    }

    pub fn emit(&self, message: &str) {
        if let Some(sink) = &self.sink {
            sink(message);
        }
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("attached", &self.sink.is_some())
            .finish()
    }
}
