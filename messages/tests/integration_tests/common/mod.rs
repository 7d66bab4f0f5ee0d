//! Common test utilities and helpers for integration tests.

use messages::chrono::{DateTime, TimeDelta};
use messages::models::{Distribution, Duration, Metric, MetricList, Unit, Value};

/// Builds a snapshot holding one metric of every kind.
///
/// # Returns
///
/// The metrics in registry traversal order, deliberately not sorted by path.
pub fn snapshot() -> MetricList {
    let latency = Distribution::from_buckets(&[5.0, 10.0], &[2, 3, 1])
        .unwrap()
        .with_statistics(1.0, 12.0, 6.5, 7.0, 39.0);
    let started = DateTime::from_timestamp(1_234_567_890, 987_654_321).unwrap();

    vec![
        Metric::new("/proc/name", "tricorder").with_description("Program name"),
        Metric::new("/health/ok", true),
        Metric::new("/proc/temperature/delta", -3_i64).with_unit(Unit::Celsius),
        Metric::new("/proc/memory/free", 4_096_u64).with_unit(Unit::Byte),
        Metric::new("/net/rate", 0.0).with_unit(Unit::BytePerSecond),
        Metric::new("/proc/start-time", Value::time(started)),
        Metric::new(
            "/proc/clock-skew",
            Duration::from_span(TimeDelta::nanoseconds(-1_500_000_000)),
        )
        .with_unit(Unit::Second),
        Metric::new("/rpc/latency", latency).with_unit(Unit::Millisecond),
        Metric::new("/rpc/idle", Distribution::empty()),
    ]
    .into()
}
