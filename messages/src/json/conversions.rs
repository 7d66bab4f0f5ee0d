//! Conversions between the sparse JSON messages and the logical model.

use crate::error::MessageError;
use crate::json::{Distribution, Metric, MetricList, RangeWithCount, Value};
use crate::models::{self, DistributionError, Kind, RangeCount};

/// The payload field that carries values of `kind`.
fn payload_field(kind: Kind) -> &'static str {
    match kind {
        Kind::Bool => "boolValue",
        Kind::Int => "intValue",
        Kind::Uint => "uintValue",
        Kind::Float => "floatValue",
        Kind::String | Kind::Duration | Kind::Time => "stringValue",
        Kind::Distribution => "distributionValue",
    }
}

impl From<&models::Distribution> for Distribution {
    fn from(dist: &models::Distribution) -> Self {
        let last = dist.ranges.len().saturating_sub(1);
        Self {
            min: dist.min,
            max: dist.max,
            average: dist.average,
            median: dist.median,
            sum: dist.sum,
            count: dist.count,
            ranges: dist
                .ranges
                .iter()
                .enumerate()
                .map(|(i, r)| RangeWithCount {
                    lower: r.lower.filter(|_| i != 0),
                    upper: r.upper.filter(|_| i != last),
                    count: r.count,
                })
                .collect(),
        }
    }
}

impl TryFrom<Distribution> for models::Distribution {
    type Error = DistributionError;

    fn try_from(wire: Distribution) -> Result<Self, Self::Error> {
        let dist = Self {
            min: wire.min,
            max: wire.max,
            average: wire.average,
            median: wire.median,
            sum: wire.sum,
            count: wire.count,
            ranges: wire
                .ranges
                .iter()
                .map(|r| RangeCount::new(r.lower, r.upper, r.count))
                .collect(),
        };
        dist.validate()?;
        Ok(dist)
    }
}

impl From<&models::Value> for Value {
    fn from(value: &models::Value) -> Self {
        let mut wire = Self::empty(value.kind());

        match value {
            models::Value::Bool(b) => wire.bool_value = Some(*b),
            models::Value::Int(i) => wire.int_value = Some(*i),
            models::Value::Uint(u) => wire.uint_value = Some(*u),
            models::Value::Float(f) => wire.float_value = Some(*f),
            models::Value::String(s) => wire.string_value = Some(s.clone()),
            models::Value::Duration(d) | models::Value::Time(d) => {
                wire.string_value = Some(d.to_decimal_seconds());
            }
            models::Value::Distribution(d) => wire.distribution_value = Some(d.into()),
        }

        wire
    }
}

impl TryFrom<Value> for models::Value {
    type Error = MessageError;

    fn try_from(wire: Value) -> Result<Self, Self::Error> {
        let kind = wire.kind;
        let expected = payload_field(kind);

        if let Some(extra) = wire.present_fields().find(|field| *field != expected) {
            return Err(MessageError::kind_mismatch(
                kind,
                format!("carries unexpected {extra}"),
            ));
        }

        let missing = || MessageError::kind_mismatch(kind, format!("has no {expected}"));

        Ok(match kind {
            Kind::Bool => Self::Bool(wire.bool_value.ok_or_else(missing)?),
            Kind::Int => Self::Int(wire.int_value.ok_or_else(missing)?),
            Kind::Uint => Self::Uint(wire.uint_value.ok_or_else(missing)?),
            Kind::Float => Self::Float(wire.float_value.ok_or_else(missing)?),
            Kind::String => Self::String(wire.string_value.ok_or_else(missing)?),
            Kind::Duration => Self::Duration(wire.string_value.ok_or_else(missing)?.parse()?),
            Kind::Time => Self::Time(wire.string_value.ok_or_else(missing)?.parse()?),
            Kind::Distribution => {
                Self::Distribution(wire.distribution_value.ok_or_else(missing)?.try_into()?)
            }
        })
    }
}

impl From<&models::Metric> for Metric {
    fn from(metric: &models::Metric) -> Self {
        Self {
            path: metric.path.clone(),
            description: metric.description.clone(),
            unit: metric.unit,
            value: Some((&metric.value).into()),
        }
    }
}

impl TryFrom<Metric> for models::Metric {
    type Error = MessageError;

    fn try_from(wire: Metric) -> Result<Self, Self::Error> {
        let value = wire.value.ok_or_else(|| MessageError::MissingValue {
            path: wire.path.clone(),
        })?;

        let metric = Self {
            path: wire.path,
            description: wire.description,
            unit: wire.unit,
            value: value.try_into()?,
        };
        metric.validate_metric()?;
        Ok(metric)
    }
}

impl models::MetricList {
    /// Converts the list to its sparse JSON messages.
    #[must_use]
    pub fn to_json(&self) -> MetricList {
        self.iter().map(Metric::from).collect()
    }

    /// Converts and validates sparse JSON messages.
    ///
    /// # Errors
    ///
    /// Returns the first metric that fails conversion or validation.
    pub fn from_json(wire: MetricList) -> Result<Self, MessageError> {
        wire.into_iter().map(models::Metric::try_from).collect()
    }

    /// Serializes the list as compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, MessageError> {
        let text = serde_json::to_string(&self.to_json())?;
        tracing::debug!(metrics = self.len(), bytes = text.len(), "Encoded JSON metric list");
        Ok(text)
    }

    /// Serializes the list as indented JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string_pretty(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }

    /// Parses and validates a list from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of metrics or any
    /// metric fails conversion or validation.
    pub fn from_json_str(text: &str) -> Result<Self, MessageError> {
        let wire: MetricList = serde_json::from_str(text)?;
        let received = wire.len();

        let list = Self::from_json(wire)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected JSON metric list"))?;
        tracing::debug!(metrics = received, "Decoded JSON metric list");
        Ok(list)
    }
}

#[cfg(test)]
#[path = "conversions_test.rs"]
mod conversions_test;
