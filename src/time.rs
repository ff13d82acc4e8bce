//! Time formatter for S3 APIs.
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// wrap of `chrono::Utc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcTime(DateTime<Utc>);

impl UtcTime {
    #[inline]
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns current utc time
    #[inline]
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Parse an RFC 822 date, like `Wed, 28 Oct 2020 00:00:00 GMT`.
    ///
    /// S3 uses this format for date headers such as `x-amz-abort-date`.
    /// A weekday that does not match the date and the `UTC`/`Z` zone names are accepted.
    pub fn parse_rfc822(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(t) = DateTime::parse_from_rfc2822(value) {
            return Some(Self::new(t.with_timezone(&Utc)));
        }
        let date = value.split_once(", ").map_or(value, |(_, date)| date);
        let date = date
            .strip_suffix(" GMT")
            .or_else(|| date.strip_suffix(" UTC"))
            .or_else(|| date.strip_suffix(" Z"))?;
        NaiveDateTime::parse_from_str(date, "%d %b %Y %H:%M:%S")
            .ok()
            .map(|t| Self::new(Utc.from_utc_datetime(&t)))
    }

    /// format date to RFC 822, like `Wed, 28 Oct 2020 00:00:00 GMT`
    #[inline]
    pub fn format_rfc822(&self) -> String {
        self.0.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    /// format date to ISO8601, like`2023-09-10T08:26:43.296Z`
    #[inline]
    pub fn format_time(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    /// format date to ISO8601, like`20230910T082643Z`
    ///
    /// Used in S3 signatures.
    #[inline]
    pub fn aws_format_time(&self) -> String {
        self.0.format("%Y%m%dT%H%M%SZ").to_string()
    }

    /// format date to aws date.
    ///
    /// Used in S3 signatures
    #[inline]
    pub fn aws_format_date(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// Seconds since the unix epoch.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    #[inline]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for UtcTime {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl From<UtcTime> for DateTime<Utc> {
    fn from(time: UtcTime) -> Self {
        time.0
    }
}
