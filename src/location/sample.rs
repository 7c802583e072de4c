use crate::location::rounding::round_display;
use bon::Builder;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, LowerExp};

/// One position reading delivered by a location provider.
///
/// Coordinates are stored as reported; rounding only happens when a sample is
/// compared, displayed or uploaded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Builder)]
pub struct PositionSample {
    #[builder(default = Utc::now())]
    #[serde(default = "Utc::now")]
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[builder(default)]
    #[serde(default)]
    pub altitude: f64,
    #[builder(default)]
    #[serde(default)]
    pub speed: f32,
    #[builder(default)]
    #[serde(default)]
    pub accuracy: f32,
    #[builder(default)]
    #[serde(default)]
    pub bearing: f32,
}

impl PositionSample {
    /// Seconds since the Unix epoch at which the fix was taken.
    pub fn epoch_seconds(&self) -> i64 {
        self.time.timestamp()
    }

    pub fn rounded_latitude(&self) -> f64 {
        round_display(self.latitude)
    }

    pub fn rounded_longitude(&self) -> f64 {
        round_display(self.longitude)
    }

    /// Human-readable summary: local time, rounded coordinates, accuracy and speed.
    pub fn display_line(&self) -> String {
        format!(
            "{} {}, {} {} {}",
            self.time.with_timezone(&Local).format("%H:%M:%S"),
            format_number(self.rounded_latitude()),
            format_number(self.rounded_longitude()),
            format_number(self.accuracy),
            format_number(self.speed),
        )
    }
}

/// Formats a number with the fewest digits that still round-trip.
///
/// Magnitudes in `[1e-3, 1e7)` and zero print as plain decimals that always
/// keep a fraction (`1.0`, `0.001`). Anything else uses scientific notation
/// with an upper-case exponent (`5.01E-4`, `1.0E7`). Infinities print as
/// `Infinity` and `-Infinity`.
pub fn format_number<N>(value: N) -> String
where
    N: Copy + Debug + LowerExp + Into<f64>,
{
    let magnitude = value.into().abs();
    if magnitude.is_nan() || magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }
    if magnitude.is_infinite() {
        return format!("{value:?}").replace("inf", "Infinity");
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}
