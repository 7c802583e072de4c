/// Decimal places used when displaying or uploading coordinates.
pub const DISPLAY_PRECISION: u32 = 6;

/// Decimal places two coordinates have to agree on to count as the same place.
pub const TOLERANCE_PRECISION: u32 = 5;

// Enough fractional digits to print any finite f64 without loss.
const EXACT_DIGITS: usize = 1100;

/// Rounds `value` towards positive infinity at `precision` decimal places.
///
/// The rounding works on the exact decimal expansion of the binary value, so
/// `1.0000004` becomes `1.000001` and `-1.0000004` becomes `-1.0`. Positive
/// values move up whenever any digit beyond `precision` is non-zero, negative
/// values are truncated towards zero.
///
/// Non-finite values are returned unchanged.
pub fn round(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let precision = (precision as usize).min(EXACT_DIGITS);

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, rest) = frac_part.split_at(precision.min(frac_part.len()));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(kept.bytes())
        .map(|b| b - b'0')
        .collect();
    if value > 0.0 && rest.bytes().any(|b| b != b'0') {
        increment(&mut digits);
    }

    let int_len = digits.len() - kept.len();
    let mut text = String::with_capacity(digits.len() + 2);
    if value < 0.0 && digits.iter().any(|&d| d != 0) {
        text.push('-');
    }
    text.extend(digits[..int_len].iter().map(|&d| char::from(b'0' + d)));
    if int_len < digits.len() {
        text.push('.');
        text.extend(digits[int_len..].iter().map(|&d| char::from(b'0' + d)));
    }
    text.parse().unwrap_or(value)
}

/// Rounds a coordinate for display or upload.
pub fn round_display(value: f64) -> f64 {
    round(value, DISPLAY_PRECISION)
}

/// Adds one unit in the last place of a big-endian decimal digit string.
fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
