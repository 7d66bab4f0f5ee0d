//! Dense encoding for the binary RPC transport.
//!
//! Every scalar field is always present on the wire; a field that does not
//! belong to the value's kind holds its zero value and must be ignored.
//! Outer bucket bounds are likewise always populated and meaningless: readers
//! ignore `lower` of the first bucket and `upper` of the last.
//!
//! # Example
//!
//! ```
//! use messages::models::{Metric, MetricList};
//!
//! let list: MetricList = vec![Metric::new("/uptime", 42_u64)].into();
//! let bytes = list.encode_rpc();
//! assert_eq!(MetricList::decode_rpc(&bytes).unwrap(), list);
//! ```

pub mod conversions;

use crate::models::{Kind, Unit};

/// The number of values within a range.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct RangeWithCount {
    /// Inclusive lower bound. Ignore for the first range.
    #[prost(double, tag = "1")]
    pub lower: f64,
    /// Exclusive upper bound. Ignore for the last range.
    #[prost(double, tag = "2")]
    pub upper: f64,
    /// The number of values falling within the range.
    #[prost(uint64, tag = "3")]
    pub count: u64,
}

/// A distribution of values.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Distribution {
    /// The minimum value.
    #[prost(double, tag = "1")]
    pub min: f64,
    /// The maximum value.
    #[prost(double, tag = "2")]
    pub max: f64,
    /// The average value.
    #[prost(double, tag = "3")]
    pub average: f64,
    /// The approximate median value.
    #[prost(double, tag = "4")]
    pub median: f64,
    /// The sum.
    #[prost(double, tag = "5")]
    pub sum: f64,
    /// The total number of values.
    #[prost(uint64, tag = "6")]
    pub count: u64,
    /// The number of values within each range.
    #[prost(message, repeated, tag = "7")]
    pub ranges: Vec<RangeWithCount>,
}

/// The value of a metric. Only the field selected by `kind` is meaningful.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Value {
    /// The value's kind.
    #[prost(enumeration = "Kind", tag = "1")]
    pub kind: i32,
    /// Bool values.
    #[prost(bool, tag = "2")]
    pub bool_value: bool,
    /// Int values.
    #[prost(int64, tag = "3")]
    pub int_value: i64,
    /// Uint values.
    #[prost(uint64, tag = "4")]
    pub uint_value: u64,
    /// Float values.
    #[prost(double, tag = "5")]
    pub float_value: f64,
    /// String values.
    #[prost(string, tag = "6")]
    pub string_value: String,
    /// Duration values, and time values as time since the Unix epoch.
    /// Unset reads as a zero duration.
    #[prost(message, optional, tag = "7")]
    pub duration_value: Option<prost_types::Duration>,
    /// Distribution values.
    #[prost(message, optional, tag = "8")]
    pub distribution_value: Option<Distribution>,
}

/// A single metric.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Metric {
    /// The absolute path to this metric.
    #[prost(string, tag = "1")]
    pub path: String,
    /// The description of this metric.
    #[prost(string, tag = "2")]
    pub description: String,
    /// The unit of measurement this metric represents.
    #[prost(enumeration = "Unit", tag = "3")]
    pub unit: i32,
    /// The value of this metric. Never unset in a well-formed metric.
    #[prost(message, optional, tag = "4")]
    pub value: Option<Value>,
}

/// A list of metrics.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MetricList {
    /// The metrics, in producer order.
    #[prost(message, repeated, tag = "1")]
    pub metrics: Vec<Metric>,
}
