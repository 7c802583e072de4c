//! Periodic upload of the last known position.
pub mod record;
pub mod scheduler;
pub mod transport;

pub use scheduler::{TickOutcome, UploadScheduler};
pub use transport::{HttpTransport, UploadTransport};
