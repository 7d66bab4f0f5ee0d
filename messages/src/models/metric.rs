//! Metric data model.
//!
//! Defines the [`Metric`] snapshot entry and the ordered [`MetricList`] that
//! a registry hands to the transports.

use crate::error::MessageError;
use crate::models::Value;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Unit of measurement of a metric.
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
#[serde(rename_all = "camelCase")]
#[repr(i32)]
pub enum Unit {
    /// No unit.
    #[serde(rename = "none")]
    Dimensionless = 0,
    /// Milliseconds.
    Millisecond = 1,
    /// Seconds.
    Second = 2,
    /// Degrees Celsius.
    Celsius = 3,
    /// Bytes.
    Byte = 4,
    /// Bytes per second.
    BytePerSecond = 5,
}

impl Unit {
    /// Returns true for [`Unit::Dimensionless`].
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        *self == Self::Dimensionless
    }
}

/// A single metric in a snapshot.
///
/// # Example
///
/// ```
/// use messages::models::{Metric, Unit, Value};
///
/// let metric = Metric::new("/proc/memory/free", Value::Uint(4096))
///     .with_description("Free memory")
///     .with_unit(Unit::Byte);
///
/// assert!(metric.validate_metric().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Metric {
    /// The absolute, slash-delimited path of the metric.
    #[validate(
        length(min = 1, message = "Metric path cannot be empty"),
        custom(function = "validate_path")
    )]
    pub path: String,

    /// Free-text description, possibly empty.
    pub description: String,

    /// The unit of measurement.
    pub unit: Unit,

    /// The value.
    pub value: Value,
}

fn validate_path(path: &str) -> Result<(), ValidationError> {
    let absolute = path
        .strip_prefix('/')
        .is_some_and(|rest| rest.split('/').all(|segment| !segment.is_empty()));

    if absolute {
        Ok(())
    } else {
        let mut err = ValidationError::new("absolute_path");
        err.message = Some("Metric path must be absolute with no empty segments".into());
        Err(err)
    }
}

impl Metric {
    /// Creates a dimensionless metric with no description.
    #[must_use]
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            description: String::new(),
            unit: Unit::Dimensionless,
            value: value.into(),
        }
    }

    /// Sets the description of the metric.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the unit of the metric.
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Validates the metric.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is empty or not absolute
    /// - The value is a malformed distribution
    pub fn validate_metric(&self) -> Result<(), MessageError> {
        self.validate()?;

        if let Value::Distribution(ref dist) = self.value {
            dist.validate()?;
        }

        Ok(())
    }
}

/// An ordered list of metrics.
///
/// Order is whatever the producer chose; it is preserved by both encodings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricList(Vec<Metric>);

impl MetricList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a metric.
    pub fn push(&mut self, metric: Metric) {
        self.0.push(metric);
    }

    /// Returns the number of metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list holds no metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the metrics in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Metric> {
        self.0.iter()
    }

    /// Looks up a metric by its path.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::MetricNotFound`] if no metric has `path`.
    pub fn get(&self, path: &str) -> Result<&Metric, MessageError> {
        self.0
            .iter()
            .find(|m| m.path == path)
            .ok_or(MessageError::MetricNotFound)
    }

    /// Validates every metric in the list.
    ///
    /// # Errors
    ///
    /// Returns the first metric validation failure.
    pub fn validate(&self) -> Result<(), MessageError> {
        self.0.iter().try_for_each(Metric::validate_metric)
    }

    /// Returns the metrics as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Metric] {
        &self.0
    }
}

impl From<Vec<Metric>> for MetricList {
    fn from(metrics: Vec<Metric>) -> Self {
        Self(metrics)
    }
}

impl FromIterator<Metric> for MetricList {
    fn from_iter<I: IntoIterator<Item = Metric>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MetricList {
    type Item = Metric;
    type IntoIter = std::vec::IntoIter<Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MetricList {
    type Item = &'a Metric;
    type IntoIter = std::slice::Iter<'a, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
