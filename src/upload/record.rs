use crate::location::PositionSample;
use crate::location::sample::format_number;

/// Name of the form field carrying the record.
pub const FORM_FIELD: &str = "coords";

/// Serializes a sample into the comma separated upload record.
///
/// Field order: device name, epoch seconds, latitude, longitude, altitude,
/// speed, accuracy, bearing. Coordinates are rounded to six decimals. The
/// record ends with a trailing comma and a newline.
pub fn upload_record(device_name: &str, sample: &PositionSample) -> String {
    format!(
        "{},{},{},{},{},{},{},{},\n",
        device_name,
        sample.epoch_seconds(),
        format_number(sample.rounded_latitude()),
        format_number(sample.rounded_longitude()),
        format_number(sample.altitude),
        format_number(sample.speed),
        format_number(sample.accuracy),
        format_number(sample.bearing),
    )
}

/// Wraps a record into the form body. The record is sent as-is, not percent-encoded.
pub fn form_body(record: &str) -> String {
    format!("{FORM_FIELD}={record}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_record_field_order_and_separators() {
        let sample = PositionSample::builder()
            .time(Utc.timestamp_millis_opt(1_726_579_168_250).unwrap())
            .latitude(52.379_188_1)
            .longitude(-4.899_431_9)
            .altitude(12.5)
            .speed(1.25)
            .accuracy(8.0)
            .bearing(270.5)
            .build();

        assert_eq!(
            upload_record("Bike", &sample),
            "Bike,1726579168,52.379189,-4.899431,12.5,1.25,8.0,270.5,\n"
        );
    }

    #[test]
    fn test_form_body_prefixes_field_name() {
        assert_eq!(form_body("a,b,\n"), "coords=a,b,\n");
    }
}
