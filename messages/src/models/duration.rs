//! Signed, nanosecond-precision time spans.
//!
//! A [`Duration`] is independent of any particular clock. It doubles as an
//! absolute timestamp when measured from the Unix epoch, which is how time
//! values travel on both wire encodings.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const NANOS_PER_SEC: i64 = 1_000_000_000;
const FRACTION_DIGITS: usize = 9;

/// A signed span of time with nanosecond precision.
///
/// For negative durations both `seconds` and `nanoseconds` are negative (or
/// zero). A value such as `seconds = 1, nanoseconds = -5` is never produced.
///
/// # Example
///
/// ```
/// use messages::models::Duration;
/// use chrono::TimeDelta;
///
/// let d = Duration::from_span(TimeDelta::nanoseconds(-1_500_000_000));
/// assert_eq!(d.seconds(), -1);
/// assert_eq!(d.nanoseconds(), -500_000_000);
/// assert_eq!(d.to_string(), "-1.500000000s");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Duration {
    seconds: i64,
    nanoseconds: i32,
}

/// Returned when text cannot be parsed as decimal seconds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid duration: '{0}' is not in [-]S.NNNNNNNNN form")]
pub struct DurationParseError(String);

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Self = Self {
        seconds: 0,
        nanoseconds: 0,
    };

    /// Creates a duration from a seconds/nanoseconds pair.
    ///
    /// The pair does not need to be normalized: whole seconds held in
    /// `nanoseconds` are carried over and mixed signs are resolved.
    #[must_use]
    pub fn new(seconds: i64, nanoseconds: i32) -> Self {
        Self::normalized(seconds, i64::from(nanoseconds))
    }

    fn normalized(seconds: i64, nanoseconds: i64) -> Self {
        let mut seconds = seconds.saturating_add(nanoseconds / NANOS_PER_SEC);
        let mut nanoseconds = nanoseconds % NANOS_PER_SEC;

        if seconds > 0 && nanoseconds < 0 {
            seconds -= 1;
            nanoseconds += NANOS_PER_SEC;
        } else if seconds < 0 && nanoseconds > 0 {
            seconds += 1;
            nanoseconds -= NANOS_PER_SEC;
        }

        Self {
            seconds,
            // |nanoseconds| < 1e9 here, so the conversion cannot fail.
            nanoseconds: i32::try_from(nanoseconds).unwrap_or_default(),
        }
    }

    /// Creates a duration from a signed `chrono` time span.
    ///
    /// Seconds are truncated toward zero, so the remainder keeps the sign of
    /// the span.
    #[must_use]
    pub fn from_span(span: TimeDelta) -> Self {
        Self::normalized(span.num_seconds(), i64::from(span.subsec_nanos()))
    }

    /// Returns the time elapsed between the Unix epoch and `time`.
    ///
    /// The result is negative when `time` precedes the epoch.
    #[must_use]
    pub fn since_epoch(time: DateTime<Utc>) -> Self {
        Self::from_span(time.signed_duration_since(DateTime::UNIX_EPOCH))
    }

    /// Converts this duration back into a `chrono` time span.
    ///
    /// Durations beyond the range of [`TimeDelta`] saturate.
    #[must_use]
    pub fn to_span(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.seconds)
            .and_then(|secs| secs.checked_add(&TimeDelta::nanoseconds(i64::from(self.nanoseconds))))
            .unwrap_or(if self.is_negative() {
                TimeDelta::MIN
            } else {
                TimeDelta::MAX
            })
    }

    /// Converts this duration, taken as time since the Unix epoch, into an
    /// absolute timestamp. This is the inverse of [`Duration::since_epoch`].
    ///
    /// Durations beyond the range of [`DateTime`] saturate.
    #[must_use]
    pub fn to_date_time(&self) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH
            .checked_add_signed(self.to_span())
            .unwrap_or(if self.is_negative() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    /// Whole seconds of this duration.
    #[must_use]
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second part of this duration, carrying the same sign as
    /// [`Duration::seconds`].
    #[must_use]
    pub fn nanoseconds(&self) -> i32 {
        self.nanoseconds
    }

    /// Returns true if this duration is shorter than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.seconds < 0 || self.nanoseconds < 0
    }

    /// Returns true if this duration is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanoseconds == 0
    }

    /// Renders the duration as decimal seconds, e.g. `1234567890.987654321`.
    ///
    /// This is the text form used for duration and time values in the JSON
    /// encoding.
    #[must_use]
    pub fn to_decimal_seconds(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{sign}{}.{:0width$}",
            self.seconds.unsigned_abs(),
            self.nanoseconds.unsigned_abs(),
            width = FRACTION_DIGITS
        )
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.to_decimal_seconds())
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Parses `[-]S[.N]` with up to nine fractional digits and an optional
    /// trailing `s`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError(s.to_string());

        let text = s.trim();
        let text = text.strip_suffix('s').unwrap_or(text);
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty()
            || !all_digits(whole)
            || fraction.len() > FRACTION_DIGITS
            || !all_digits(fraction)
        {
            return Err(invalid());
        }

        // The magnitude of i64::MIN only fits unsigned.
        let magnitude: u64 = whole.parse().map_err(|_| invalid())?;
        let nanoseconds = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(FRACTION_DIGITS)
            .fold(0_i32, |acc, b| acc * 10 + i32::from(b - b'0'));

        Ok(if negative {
            let seconds = 0_i64.checked_sub_unsigned(magnitude).ok_or_else(invalid)?;
            Self::new(seconds, -nanoseconds)
        } else {
            let seconds = i64::try_from(magnitude).map_err(|_| invalid())?;
            Self::new(seconds, nanoseconds)
        })
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Self::normalized(
            i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
            i64::from(d.subsec_nanos()),
        )
    }
}

impl From<TimeDelta> for Duration {
    fn from(span: TimeDelta) -> Self {
        Self::from_span(span)
    }
}

impl From<Duration> for TimeDelta {
    fn from(d: Duration) -> Self {
        d.to_span()
    }
}
