//! Unix-second timestamps as used by every `created` field.

use chrono::{DateTime, TimeZone, Utc};

/// Converts a wire timestamp; `None` for zero or out-of-range values.
pub fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    if seconds == 0 {
        return None;
    }
    Utc.timestamp_opt(seconds, 0).single()
}

/// Inverse of [`from_unix`] for building params.
pub fn to_unix(at: DateTime<Utc>) -> i64 {
    at.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unix() {
        let at = from_unix(1_700_000_000).unwrap();
        assert_eq!(at.to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert_eq!(to_unix(at), 1_700_000_000);
        assert!(from_unix(0).is_none());
        assert!(from_unix(i64::MAX).is_none());
    }
}
