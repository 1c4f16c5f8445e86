use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A UTC instant rendered as `yyyy-MM-ddTHH:mm:ss.fffffffZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// The current instant, truncated to the seven fractional digits the wire carries.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(7))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:07}Z",
            self.0.format("%Y-%m-%dT%H:%M:%S"),
            self.0.timestamp_subsec_nanos() / 100
        )
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match DateTime::parse_from_rfc3339(s) {
            Ok(ts) => Ok(Self(ts.with_timezone(&Utc))),
            // Offset-less values are taken as UTC, bare dates as midnight.
            Err(e) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN))
                })
                .map(|naive| Self(naive.and_utc()))
                .map_err(|_| e),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn renders_seven_fraction_digits() {
        let ts = Timestamp(Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::nanoseconds(123_456_789));
        assert_eq!(ts.to_string(), "2024-03-09T07:05:01.1234567Z");
    }

    #[test]
    fn parses_offsets_and_naive_values() {
        let utc: Timestamp = "2024-03-09T07:05:01.1234567Z".parse().unwrap();
        let shifted: Timestamp = "2024-03-09T09:05:01.1234567+02:00".parse().unwrap();
        let naive: Timestamp = "2024-03-09T07:05:01.1234567".parse().unwrap();
        assert_eq!(utc, shifted);
        assert_eq!(utc, naive);
        assert!("NotADateAtAll".parse::<Timestamp>().is_err());
    }

    #[test]
    fn bare_dates_are_midnight_utc() {
        let date: Timestamp = "2024-10-15".parse().unwrap();
        let echoed: Timestamp = "2024-10-15T00:00:00".parse().unwrap();
        assert_eq!(date, echoed);
        assert_eq!(date.to_string(), "2024-10-15T00:00:00.0000000Z");
        assert!("2024-13-01".parse::<Timestamp>().is_err());
    }

    #[test]
    fn now_round_trips_through_text() {
        let now = Timestamp::now();
        let parsed: Timestamp = now.to_string().parse().unwrap();
        assert_eq!(parsed, now);
    }
}
