//! Metric value model.
//!
//! A [`Value`] carries exactly one payload; its [`Kind`] is derived from the
//! payload rather than stored beside it.

use crate::error::MessageError;
use crate::models::{Distribution, Duration};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The type of a metric value.
///
/// Discriminants are the values used on the RPC wire; the lowercase names are
/// used in JSON.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ::prost::Enumeration,
)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Kind {
    /// A boolean.
    Bool = 0,
    /// A signed 64-bit integer.
    Int = 1,
    /// An unsigned 64-bit integer.
    Uint = 2,
    /// A 64-bit float.
    Float = 3,
    /// A string.
    String = 4,
    /// A span of time.
    Duration = 5,
    /// An absolute time, stored as a duration since the Unix epoch.
    Time = 6,
    /// A distribution of values.
    Distribution = 7,
}

impl Kind {
    /// Returns the name used for this kind in JSON.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Duration => "duration",
            Self::Time => "time",
            Self::Distribution => "distribution",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of a metric.
///
/// # Example
///
/// ```
/// use messages::models::{Kind, Value};
///
/// let value = Value::from(3.5);
/// assert_eq!(value.kind(), Kind::Float);
/// assert_eq!(value.as_float(), Some(3.5));
/// assert_eq!(value.as_int(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean value.
    Bool(bool),
    /// A signed integer value.
    Int(i64),
    /// An unsigned integer value.
    Uint(u64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    String(String),
    /// A span of time.
    Duration(Duration),
    /// An absolute time as a duration since the Unix epoch.
    Time(Duration),
    /// A distribution of values.
    Distribution(Distribution),
}

impl Value {
    /// Creates a time value from an absolute timestamp.
    #[must_use]
    pub fn time(time: DateTime<Utc>) -> Self {
        Self::Time(Duration::since_epoch(time))
    }

    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Uint(_) => Kind::Uint,
            Self::Float(_) => Kind::Float,
            Self::String(_) => Kind::String,
            Self::Duration(_) => Kind::Duration,
            Self::Time(_) => Kind::Time,
            Self::Distribution(_) => Kind::Distribution,
        }
    }

    /// Returns the boolean if this is a bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the integer if this is a uint value.
    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(u) => Some(*u),
            _ => None,
        }
    }

    /// Returns the float if this is a float value.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the span if this is a duration value.
    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a time value.
    #[must_use]
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(d) => Some(d.to_date_time()),
            _ => None,
        }
    }

    /// Returns the distribution if this is a distribution value.
    #[must_use]
    pub fn as_distribution(&self) -> Option<&Distribution> {
        match self {
            Self::Distribution(d) => Some(d),
            _ => None,
        }
    }

    /// Orders two values of the same kind.
    ///
    /// Floats may be unordered (NaN). Distributions are only ever equal or
    /// unordered.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::KindMismatch`] if the values differ in kind.
    pub fn compare(&self, other: &Self) -> Result<Option<Ordering>, MessageError> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Ok(Some(a.cmp(b))),
            (Self::Int(a), Self::Int(b)) => Ok(Some(a.cmp(b))),
            (Self::Uint(a), Self::Uint(b)) => Ok(Some(a.cmp(b))),
            (Self::Float(a), Self::Float(b)) => Ok(a.partial_cmp(b)),
            (Self::String(a), Self::String(b)) => Ok(Some(a.cmp(b))),
            (Self::Duration(a), Self::Duration(b)) | (Self::Time(a), Self::Time(b)) => {
                Ok(Some(a.cmp(b)))
            }
            (Self::Distribution(a), Self::Distribution(b)) => {
                Ok((a == b).then_some(Ordering::Equal))
            }
            _ => Err(MessageError::KindMismatch {
                kind: self.kind(),
                detail: format!("compared with a {} value", other.kind()),
            }),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Self::time(t)
    }
}

impl From<Distribution> for Value {
    fn from(d: Distribution) -> Self {
        Self::Distribution(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_kind_follows_payload() {
        assert_eq!(Value::from(true).kind(), Kind::Bool);
        assert_eq!(Value::from(-3_i64).kind(), Kind::Int);
        assert_eq!(Value::from(3_u64).kind(), Kind::Uint);
        assert_eq!(Value::from(3.5).kind(), Kind::Float);
        assert_eq!(Value::from("up").kind(), Kind::String);
        assert_eq!(Value::from(Duration::ZERO).kind(), Kind::Duration);
        assert_eq!(Value::from(Utc::now()).kind(), Kind::Time);
        assert_eq!(
            Value::from(Distribution::empty()).kind(),
            Kind::Distribution
        );
    }

    #[test]
    fn test_accessors_ignore_other_kinds() {
        let value = Value::from(7_u64);
        assert_eq!(value.as_uint(), Some(7));
        assert_eq!(value.as_int(), None);
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.as_str(), None);
        assert!(value.as_distribution().is_none());
    }

    #[test]
    fn test_time_value_round_trips_timestamp() {
        let t = DateTime::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        let value = Value::time(t);
        assert_eq!(value.as_time(), Some(t));
        assert_eq!(value.as_duration(), None);
    }

    #[test]
    fn test_compare_same_kind() {
        let a = Value::from(Duration::from_span(TimeDelta::seconds(1)));
        let b = Value::from(Duration::from_span(TimeDelta::seconds(2)));
        assert_eq!(a.compare(&b).unwrap(), Some(Ordering::Less));

        let nan = Value::from(f64::NAN);
        assert_eq!(nan.compare(&Value::from(1.0)).unwrap(), None);

        let dist = Value::from(Distribution::empty());
        assert_eq!(dist.compare(&dist).unwrap(), Some(Ordering::Equal));
    }

    #[test]
    fn test_compare_across_kinds_is_rejected() {
        let result = Value::from(1_i64).compare(&Value::from(1_u64));
        assert!(matches!(
            result,
            Err(MessageError::KindMismatch {
                kind: Kind::Int,
                ..
            })
        ));
    }

    #[test]
    fn test_duration_and_time_are_distinct_kinds() {
        let d = Duration::new(5, 0);
        assert!(Value::Duration(d).compare(&Value::Time(d)).is_err());
        assert_ne!(Value::Duration(d), Value::Time(d));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Kind::Uint).unwrap(), "\"uint\"");
        assert_eq!(
            serde_json::from_str::<Kind>("\"distribution\"").unwrap(),
            Kind::Distribution
        );
        assert_eq!(Kind::Time.to_string(), "time");
    }
}
