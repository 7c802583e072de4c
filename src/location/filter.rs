use crate::location::rounding::{TOLERANCE_PRECISION, round};
use crate::location::sample::PositionSample;

/// Returns true when two samples are further apart than the movement tolerance.
///
/// Latitude and longitude are each rounded up to [`TOLERANCE_PRECISION`]
/// decimal places; the samples differ if either rounded coordinate differs.
/// Every other field is ignored.
pub fn is_different(a: &PositionSample, b: &PositionSample) -> bool {
    let lat_diff = round(a.latitude, TOLERANCE_PRECISION) != round(b.latitude, TOLERANCE_PRECISION);
    let lon_diff =
        round(a.longitude, TOLERANCE_PRECISION) != round(b.longitude, TOLERANCE_PRECISION);
    lat_diff || lon_diff
}
