//! crates/filters/src/timestamp.rs
//! Date bounds for the `modified_*` and `created_*` dimensions.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::FilterError;

/// A point in time used as an inclusive date bound.
///
/// Parses from `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
///
/// ```
/// use filters::Timestamp;
/// use std::time::{Duration, SystemTime};
///
/// let day: Timestamp = "1970-01-02".parse().unwrap();
/// assert_eq!(day.as_system_time(), SystemTime::UNIX_EPOCH + Duration::from_secs(86_400));
///
/// let exact: Timestamp = "1970-01-01T00:01:00+00:00".parse().unwrap();
/// assert_eq!(exact.as_system_time(), SystemTime::UNIX_EPOCH + Duration::from_secs(60));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp(SystemTime);

impl Timestamp {
    /// Wraps a [`SystemTime`].
    #[must_use]
    pub const fn new(time: SystemTime) -> Self {
        Self(time)
    }

    /// Returns the wrapped time.
    #[must_use]
    pub const fn as_system_time(self) -> SystemTime {
        self.0
    }

    /// Converts to a UTC date-time, or `None` outside the range `time` supports.
    fn to_offset_date_time(self) -> Option<OffsetDateTime> {
        match self.0.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => OffsetDateTime::UNIX_EPOCH.checked_add(after.try_into().ok()?),
            Err(before) => {
                OffsetDateTime::UNIX_EPOCH.checked_sub(before.duration().try_into().ok()?)
            }
        }
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        Self(time)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(time: OffsetDateTime) -> Self {
        Self(time.into())
    }
}

impl FromStr for Timestamp {
    type Err = FilterError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if let Ok(time) = OffsetDateTime::parse(text, &Rfc3339) {
            return Ok(time.into());
        }
        Date::parse(text, format_description!("[year]-[month]-[day]"))
            .map(|date| date.midnight().assume_utc().into())
            .map_err(|source| FilterError::InvalidTimestamp {
                value: text.to_owned(),
                source,
            })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_offset_date_time().map(|time| time.format(&Rfc3339)) {
            Some(Ok(text)) => f.write_str(&text),
            _ => write!(f, "{:?}", self.0),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
