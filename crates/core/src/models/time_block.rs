use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A staff member's declared unavailability.
///
/// Timestamps are kept as the backend sent them; an unparseable value must
/// still survive the expiry sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: i64,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default)]
    pub reason: String,
}

impl TimeBlock {
    pub fn starts_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.starts_at)
    }

    pub fn ends_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.ends_at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTimeBlocksResponse {
    pub time_blocks: Vec<TimeBlock>,
}

/// Body for both creating and updating a time block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlockRequest {
    pub reason: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Parses RFC 3339, or a naive `YYYY-MM-DDTHH:MM[:SS]` read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_offsets_and_naive_values() {
        let expected = Utc.with_ymd_and_hms(2030, 1, 2, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2030-01-02T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2030-01-02T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2030-01-02T10:30"), Some(expected));
        assert_eq!(parse_timestamp("2030-01-02T10:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("not a date"), None);
    }
}
