//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Serializes as milliseconds since the Unix epoch, the unit bot frameworks
/// stamp updates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_serializes_as_unix_millis() {
        let ts: Timestamp = serde_json::from_value(json!(1_705_314_600_250_i64)).unwrap();

        assert_eq!(
            ts.as_datetime().to_rfc3339(),
            "2024-01-15T10:30:00.250+00:00"
        );
        assert_eq!(serde_json::to_value(ts).unwrap(), json!(1_705_314_600_250_i64));
    }

    #[test]
    fn timestamp_now_serializes_to_integer() {
        let value = serde_json::to_value(Timestamp::now()).unwrap();

        assert!(value.as_i64().is_some_and(|millis| millis > 1_700_000_000_000));
    }
}
