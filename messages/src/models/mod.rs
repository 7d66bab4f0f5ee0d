//! Logical data model for metric snapshots.
//!
//! These types are independent of any wire encoding. The [`rpc`](crate::rpc)
//! and [`json`](crate::json) modules map them to and from their transports.

pub mod distribution;
pub mod duration;
pub mod metric;
pub mod value;

pub use distribution::{BoundSide, Distribution, DistributionError, RangeCount};
pub use duration::{Duration, DurationParseError};
pub use metric::{Metric, MetricList, Unit};
pub use value::{Kind, Value};
