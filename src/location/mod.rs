//! Position samples and the logic deciding which of them are worth keeping.
pub mod filter;
pub mod history;
pub mod rounding;
pub mod sample;

pub use filter::is_different;
pub use history::LocationHistory;
pub use sample::PositionSample;
