use chrono::{DateTime, SecondsFormat, Utc};
use logwire_core::{ClientError, Result};
use prost_types::Timestamp;

/// Parses RFC 3339 text into the wire timestamp. Anything that is not
/// strict RFC 3339 is rejected; nothing is defaulted.
pub fn encode_timestamp(text: &str) -> Result<Timestamp> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .map_err(|e| ClientError::InvalidTimestamp(format!("{text}: {e}")))?;
    let utc = parsed.with_timezone(&Utc);
    Ok(Timestamp {
        seconds: utc.timestamp(),
        nanos: utc.timestamp_subsec_nanos() as i32,
    })
}

/// Renders a wire timestamp back to RFC 3339 text, UTC-normalized with a
/// `Z` suffix; fractional seconds appear only when present. An unset wire
/// timestamp decodes to the empty string rather than an error.
pub fn decode_timestamp(ts: Option<&Timestamp>) -> Result<String> {
    let Some(ts) = ts else {
        return Ok(String::new());
    };
    let nanos = u32::try_from(ts.nanos).map_err(|_| {
        ClientError::InvalidTimestamp(format!("wire timestamp has negative nanos: {}", ts.nanos))
    })?;
    let instant = DateTime::<Utc>::from_timestamp(ts.seconds, nanos).ok_or_else(|| {
        ClientError::InvalidTimestamp(format!("wire timestamp out of range: {}s", ts.seconds))
    })?;
    Ok(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_utc_second_precision() {
        let text = "2024-01-01T00:00:00Z";
        let wire = encode_timestamp(text).unwrap();
        assert_eq!(decode_timestamp(Some(&wire)).unwrap(), text);
    }

    #[test]
    fn round_trips_fractional_seconds() {
        let text = "2024-06-15T12:30:45.123456Z";
        let wire = encode_timestamp(text).unwrap();
        assert_eq!(decode_timestamp(Some(&wire)).unwrap(), text);
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let wire = encode_timestamp("2024-01-01T09:00:00+09:00").unwrap();
        assert_eq!(
            decode_timestamp(Some(&wire)).unwrap(),
            "2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn rejects_non_rfc3339() {
        for bad in ["", "2024-01-01", "yesterday", "2024-01-01 00:00:00"] {
            assert!(matches!(
                encode_timestamp(bad),
                Err(ClientError::InvalidTimestamp(_))
            ));
        }
    }

    #[test]
    fn unset_wire_timestamp_decodes_to_empty() {
        assert_eq!(decode_timestamp(None).unwrap(), "");
    }

    #[test]
    fn zero_wire_timestamp_is_the_epoch_not_unset() {
        let zero = Timestamp { seconds: 0, nanos: 0 };
        assert_eq!(
            decode_timestamp(Some(&zero)).unwrap(),
            "1970-01-01T00:00:00Z"
        );
    }
}
