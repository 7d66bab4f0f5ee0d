//! Sparse encoding for the JSON/REST transport.
//!
//! Optional data is expressed by presence rather than sentinel values: a
//! value carries only the payload field its `kind` selects, and outer bucket
//! bounds are omitted. Zero statistics, empty descriptions and the `none`
//! unit are omitted too; `kind` and `count` are always written.
//!
//! Duration and time values travel in `stringValue` as decimal seconds, e.g.
//! `"1234567890.987654321"` for a time value.
//!
//! # Example
//!
//! ```
//! use messages::json;
//! use messages::models::Value;
//!
//! let wire = json::Value::from(&Value::Float(3.5));
//! let text = serde_json::to_string(&wire).unwrap();
//! assert_eq!(text, r#"{"kind":"float","floatValue":3.5}"#);
//! ```

pub mod conversions;

use crate::models::{Kind, Unit};
use serde::{Deserialize, Serialize};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

/// The number of values within a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeWithCount {
    /// Inclusive lower bound; absent means no lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    /// Exclusive upper bound; absent means no upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    /// The number of values falling within the range.
    pub count: u64,
}

/// A distribution of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    /// The minimum value.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub min: f64,
    /// The maximum value.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max: f64,
    /// The average value.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub average: f64,
    /// The approximate median value.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub median: f64,
    /// The sum.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub sum: f64,
    /// The total number of values.
    pub count: u64,
    /// The number of values within each range.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<RangeWithCount>,
}

/// The value of a metric. Exactly one payload field is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    /// The value's kind.
    pub kind: Kind,
    /// Bool values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    /// Int values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_value: Option<i64>,
    /// Uint values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uint_value: Option<u64>,
    /// Float values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_value: Option<f64>,
    /// String values, and duration or time values as decimal seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// Distribution values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_value: Option<Distribution>,
}

impl Value {
    /// Creates a value of `kind` with no payload set.
    #[must_use]
    pub fn empty(kind: Kind) -> Self {
        Self {
            kind,
            bool_value: None,
            int_value: None,
            uint_value: None,
            float_value: None,
            string_value: None,
            distribution_value: None,
        }
    }

    /// Names of the payload fields that are present.
    fn present_fields(&self) -> impl Iterator<Item = &'static str> {
        [
            ("boolValue", self.bool_value.is_some()),
            ("intValue", self.int_value.is_some()),
            ("uintValue", self.uint_value.is_some()),
            ("floatValue", self.float_value.is_some()),
            ("stringValue", self.string_value.is_some()),
            ("distributionValue", self.distribution_value.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
    }
}

/// A single metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// The absolute path to this metric.
    pub path: String,
    /// The description of this metric.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// The unit of measurement this metric represents.
    #[serde(default, skip_serializing_if = "Unit::is_dimensionless")]
    pub unit: Unit,
    /// The value of this metric.
    #[serde(default)]
    pub value: Option<Value>,
}

/// A list of metrics, encoded as a JSON array.
pub type MetricList = Vec<Metric>;
