//! Errors returned by conversions, validation and lookups.

use crate::models::{DistributionError, DurationParseError, Kind};
use thiserror::Error;

/// Errors that can occur while building, converting or querying metrics.
#[derive(Debug, Error)]
pub enum MessageError {
    /// No metric with the requested path exists.
    ///
    /// Every transport reports a failed lookup with this one variant.
    #[error("messages: No metric found.")]
    MetricNotFound,

    /// A distribution violates its bucket, count or statistic invariants.
    #[error("Malformed distribution: {0}")]
    MalformedDistribution(#[from] DistributionError),

    /// A value's declared kind does not match the payload it carries.
    #[error("Kind mismatch: {kind} value {detail}")]
    KindMismatch {
        /// The declared kind.
        kind: Kind,
        /// What was wrong with the payload.
        detail: String,
    },

    /// A duration or time payload could not be parsed.
    #[error(transparent)]
    InvalidDuration(#[from] DurationParseError),

    /// The RPC encoding carried an undefined kind discriminant.
    #[error("Unknown value kind: {0}")]
    UnknownKind(i32),

    /// The RPC encoding carried an undefined unit discriminant.
    #[error("Unknown unit: {0}")]
    UnknownUnit(i32),

    /// A metric arrived without a value.
    #[error("Metric '{path}' has no value")]
    MissingValue {
        /// Path of the offending metric.
        path: String,
    },

    /// A metric failed field validation.
    #[error("Invalid metric: {0}")]
    InvalidMetric(#[from] validator::ValidationErrors),

    /// The RPC bytes are not a valid message.
    #[error("Failed to decode RPC message: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The JSON text is not a valid message.
    #[error("Failed to parse JSON message: {0}")]
    Json(#[from] serde_json::Error),
}

impl MessageError {
    /// Returns true for [`MessageError::MetricNotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MetricNotFound)
    }

    pub(crate) fn kind_mismatch(kind: Kind, detail: impl Into<String>) -> Self {
        Self::KindMismatch {
            kind,
            detail: detail.into(),
        }
    }
}
