//! # GPS Tracker
//!
//! Periodically sample a device's position, drop readings that did not move
//! meaningfully and upload new ones to an HTTP endpoint.
//!
//! ## Key Features
//!
//! - **Movement filter**: two samples are the same place when their latitude and
//!   longitude agree after rounding up to five decimals.
//! - **Location history**: every accepted sample, in arrival order, clearable under memory pressure.
//! - **Upload scheduler**: starts on the first fix and POSTs the last known sample
//!   every interval (15 s by default) unless it was already sent.
//! - **Pluggable collaborators**: location providers and upload transports are traits,
//!   with a JSON-lines provider and a `reqwest` HTTP transport included.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gps_tracker::{HttpTransport, JsonLinesProvider, Observer, Service, Tracker, TrackerConfig};
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let config = TrackerConfig {
//!         upload_url: Some("http://example.com/track".to_string()),
//!         ..TrackerConfig::default()
//!     };
//!     let mut tracker = Tracker::builder()
//!         .provider(JsonLinesProvider::new(tokio::io::stdin()))
//!         .transport(HttpTransport::new())
//!         .config(config)
//!         .observer(Observer::new(|message| println!("{message}")))
//!         .build();
//!
//!     tracker.init()?;
//!     tracker.start()?;
//!     tokio::signal::ctrl_c().await?;
//!     tracker.shutdown()?;
//!     tracker.wait_for_uploads().await;
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod location;
pub mod observer;
pub mod provider;
pub mod tracker;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use config::TrackerConfig;
pub use error::{ConfigError, TrackerError, UploadError};
pub use location::{LocationHistory, PositionSample, is_different};
pub use observer::Observer;
pub use provider::{JsonLinesProvider, LocationProvider, ProviderEvent};
pub use tracker::{LocationListener, Service, ServiceStatus, Tracker};
pub use upload::{HttpTransport, TickOutcome, UploadTransport};
