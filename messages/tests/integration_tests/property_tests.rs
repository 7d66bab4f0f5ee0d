//! Property tests for the round-trip law of both encodings.
//!
//! Arbitrary values of every kind are wrapped in a one-metric list and sent
//! through the RPC and JSON encodings; what comes back must equal what went
//! in.

use messages::models::{Distribution, Duration, Metric, MetricList, Value};
use quickcheck::{QuickCheck, TestResult};

const KINDS: u8 = 8;
const MAX_BUCKETS: usize = 12;
const BUCKET_WIDTH: f64 = 2.5;

/// Builds a valid distribution with one bucket per entry of `counts`.
fn distribution(counts: &[u32]) -> Distribution {
    let counts: Vec<u64> = counts
        .iter()
        .take(MAX_BUCKETS)
        .map(|&c| u64::from(c))
        .collect();
    if counts.iter().all(|&c| c == 0) {
        return Distribution::empty();
    }

    #[allow(clippy::cast_precision_loss)]
    let bounds: Vec<f64> = (1..counts.len()).map(|i| i as f64 * BUCKET_WIDTH).collect();
    let dist = Distribution::from_buckets(&bounds, &counts).unwrap();

    #[allow(clippy::cast_precision_loss)]
    let (max, sum) = (counts.len() as f64 * BUCKET_WIDTH, dist.count as f64);
    dist.with_statistics(0.0, max, max / 2.0, max / 2.0, sum)
}

#[allow(clippy::too_many_arguments)]
fn value(
    kind: u8,
    int: i64,
    uint: u64,
    float: f64,
    text: String,
    counts: &[u32],
    seconds: i64,
    nanoseconds: i32,
) -> Value {
    match kind % KINDS {
        0 => Value::Bool(int % 2 == 0),
        1 => Value::Int(int),
        2 => Value::Uint(uint),
        3 => Value::Float(float),
        4 => Value::String(text),
        5 => Value::Duration(Duration::new(seconds, nanoseconds)),
        6 => Value::Time(Duration::new(seconds, nanoseconds)),
        _ => Value::Distribution(distribution(counts)),
    }
}

#[allow(clippy::too_many_arguments)]
fn round_trip(
    kind: u8,
    int: i64,
    uint: u64,
    float: f64,
    text: String,
    counts: Vec<u32>,
    seconds: i64,
    nanoseconds: i32,
) -> TestResult {
    // NaN and infinities have no JSON number form.
    if !float.is_finite() {
        return TestResult::discard();
    }

    let value = value(kind, int, uint, float, text, &counts, seconds, nanoseconds);
    let list = MetricList::from(vec![Metric::new("/property/value", value)]);
    if list.validate().is_err() {
        return TestResult::failed();
    }

    let from_rpc = MetricList::decode_rpc(&list.encode_rpc());
    let from_json = list
        .to_json_string()
        .and_then(|text| MetricList::from_json_str(&text));

    TestResult::from_bool(
        from_rpc.as_ref().is_ok_and(|decoded| *decoded == list)
            && from_json.as_ref().is_ok_and(|decoded| *decoded == list),
    )
}

#[test]
fn test_value_round_trip_property() {
    QuickCheck::new().tests(2000).quickcheck(
        round_trip as fn(u8, i64, u64, f64, String, Vec<u32>, i64, i32) -> TestResult,
    );
}

#[test]
fn test_extreme_durations_round_trip() {
    for (seconds, nanoseconds) in [
        (i64::MIN, -1),
        (i64::MIN, -999_999_999),
        (i64::MAX, 999_999_999),
        (-9_223_372_036_854_775_806, -2_000_000_000),
    ] {
        for kind in [5, 6] {
            let result = round_trip(
                kind,
                0,
                0,
                0.0,
                String::new(),
                Vec::new(),
                seconds,
                nanoseconds,
            );
            assert!(!result.is_failure(), "({seconds}, {nanoseconds}) did not round trip");
        }
    }
}
