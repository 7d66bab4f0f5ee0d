//! Conversions between the dense RPC messages and the logical model.
//!
//! Encoding is total. Decoding validates everything it produces, so a
//! successfully decoded metric always satisfies the model's invariants.

use crate::error::MessageError;
use crate::models::{self, DistributionError, Kind, RangeCount, Unit};
use crate::rpc::{Distribution, Metric, MetricList, RangeWithCount, Value};
use prost::Message;

impl From<models::Duration> for prost_types::Duration {
    fn from(d: models::Duration) -> Self {
        Self {
            seconds: d.seconds(),
            nanos: d.nanoseconds(),
        }
    }
}

impl From<prost_types::Duration> for models::Duration {
    fn from(d: prost_types::Duration) -> Self {
        Self::new(d.seconds, d.nanos)
    }
}

impl From<&models::Distribution> for Distribution {
    fn from(dist: &models::Distribution) -> Self {
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
                .map(|r| RangeWithCount {
                    lower: r.lower.unwrap_or_default(),
                    upper: r.upper.unwrap_or_default(),
                    count: r.count,
                })
                .collect(),
        }
    }
}

impl TryFrom<Distribution> for models::Distribution {
    type Error = DistributionError;

    fn try_from(wire: Distribution) -> Result<Self, Self::Error> {
        let last = wire.ranges.len().saturating_sub(1);
        let ranges = wire
            .ranges
            .iter()
            .enumerate()
            .map(|(i, r)| {
                RangeCount::new(
                    (i != 0).then_some(r.lower),
                    (i != last).then_some(r.upper),
                    r.count,
                )
            })
            .collect();

        let dist = Self {
            min: wire.min,
            max: wire.max,
            average: wire.average,
            median: wire.median,
            sum: wire.sum,
            count: wire.count,
            ranges,
        };
        dist.validate()?;
        Ok(dist)
    }
}

impl From<&models::Value> for Value {
    fn from(value: &models::Value) -> Self {
        let mut wire = Self {
            kind: value.kind().into(),
            ..Self::default()
        };

        match value {
            models::Value::Bool(b) => wire.bool_value = *b,
            models::Value::Int(i) => wire.int_value = *i,
            models::Value::Uint(u) => wire.uint_value = *u,
            models::Value::Float(f) => wire.float_value = *f,
            models::Value::String(s) => wire.string_value.clone_from(s),
            models::Value::Duration(d) | models::Value::Time(d) => {
                wire.duration_value = Some((*d).into());
            }
            models::Value::Distribution(d) => wire.distribution_value = Some(d.into()),
        }

        wire
    }
}

impl TryFrom<Value> for models::Value {
    type Error = MessageError;

    fn try_from(wire: Value) -> Result<Self, Self::Error> {
        let kind = Kind::try_from(wire.kind).map_err(|_| MessageError::UnknownKind(wire.kind))?;
        let duration = wire
            .duration_value
            .map(models::Duration::from)
            .unwrap_or_default();

        Ok(match kind {
            Kind::Bool => Self::Bool(wire.bool_value),
            Kind::Int => Self::Int(wire.int_value),
            Kind::Uint => Self::Uint(wire.uint_value),
            Kind::Float => Self::Float(wire.float_value),
            Kind::String => Self::String(wire.string_value),
            Kind::Duration => Self::Duration(duration),
            Kind::Time => Self::Time(duration),
            Kind::Distribution => {
                let dist = wire
                    .distribution_value
                    .ok_or_else(|| MessageError::kind_mismatch(kind, "has no distributionValue"))?;
                Self::Distribution(dist.try_into()?)
            }
        })
    }
}

impl From<&models::Metric> for Metric {
    fn from(metric: &models::Metric) -> Self {
        Self {
            path: metric.path.clone(),
            description: metric.description.clone(),
            unit: metric.unit.into(),
            value: Some((&metric.value).into()),
        }
    }
}

impl TryFrom<Metric> for models::Metric {
    type Error = MessageError;

    fn try_from(wire: Metric) -> Result<Self, Self::Error> {
        let unit = Unit::try_from(wire.unit).map_err(|_| MessageError::UnknownUnit(wire.unit))?;
        let value = wire.value.ok_or_else(|| MessageError::MissingValue {
            path: wire.path.clone(),
        })?;

        let metric = Self {
            path: wire.path,
            description: wire.description,
            unit,
            value: value.try_into()?,
        };
        metric.validate_metric()?;
        Ok(metric)
    }
}

impl From<&models::MetricList> for MetricList {
    fn from(list: &models::MetricList) -> Self {
        Self {
            metrics: list.iter().map(Metric::from).collect(),
        }
    }
}

impl TryFrom<MetricList> for models::MetricList {
    type Error = MessageError;

    fn try_from(wire: MetricList) -> Result<Self, Self::Error> {
        wire.metrics.into_iter().map(models::Metric::try_from).collect()
    }
}

impl models::MetricList {
    /// Encodes the list in the dense RPC encoding.
    #[must_use]
    pub fn encode_rpc(&self) -> Vec<u8> {
        let bytes = MetricList::from(self).encode_to_vec();
        tracing::debug!(
            metrics = self.len(),
            bytes = bytes.len(),
            "Encoded RPC metric list"
        );
        bytes
    }

    /// Decodes and validates a list in the dense RPC encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid message or any metric
    /// fails conversion or validation.
    pub fn decode_rpc(bytes: &[u8]) -> Result<Self, MessageError> {
        let wire = MetricList::decode(bytes)?;
        let received = wire.metrics.len();

        let list = Self::try_from(wire)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected RPC metric list"))?;
        tracing::debug!(metrics = received, "Decoded RPC metric list");
        Ok(list)
    }
}

#[cfg(test)]
#[path = "conversions_test.rs"]
mod conversions_test;
