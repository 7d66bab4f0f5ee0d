//! Integration tests for the RPC and JSON encodings.
//!
//! Tests cover:
//! - Round trips through each encoding
//! - Converting a dense snapshot into the sparse one and back
//! - Reading one snapshot from several threads

use messages::models::MetricList;
use messages::{json, rpc, MessageError};
use serde_json::Value;

use super::common::snapshot;

#[test]
fn test_snapshot_is_valid() {
    assert!(snapshot().validate().is_ok());
}

#[test]
fn test_rpc_round_trip() {
    let list = snapshot();
    let bytes = list.encode_rpc();
    assert_eq!(MetricList::decode_rpc(&bytes).unwrap(), list);
}

#[test]
fn test_json_round_trip() {
    let list = snapshot();
    let text = list.to_json_string().unwrap();
    assert_eq!(MetricList::from_json_str(&text).unwrap(), list);
}

#[test]
fn test_dense_to_sparse_and_back() {
    let dense = rpc::MetricList::from(&snapshot());

    let logical = MetricList::try_from(dense.clone()).unwrap();
    let sparse: json::MetricList = logical.to_json();
    let text = serde_json::to_string(&sparse).unwrap();

    let reparsed = MetricList::from_json_str(&text).unwrap();
    assert_eq!(rpc::MetricList::from(&reparsed), dense);
}

#[test]
fn test_sparse_text_shape() {
    let text = snapshot().to_json_string().unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();
    let metrics = json.as_array().unwrap();

    assert_eq!(metrics.len(), 9);
    assert_eq!(metrics[0]["path"], "/proc/name");
    assert_eq!(metrics[0]["value"]["stringValue"], "tricorder");

    assert_eq!(
        metrics[1]["value"],
        serde_json::json!({"kind": "bool", "boolValue": true})
    );
    assert!(metrics[1].get("unit").is_none());
    // A zero payload is still written.
    assert_eq!(metrics[4]["value"]["floatValue"], 0.0);

    assert_eq!(metrics[5]["value"]["kind"], "time");
    assert_eq!(metrics[5]["value"]["stringValue"], "1234567890.987654321");
    assert_eq!(metrics[6]["value"]["stringValue"], "-1.500000000");

    let ranges = metrics[7]["value"]["distributionValue"]["ranges"]
        .as_array()
        .unwrap();
    assert!(ranges[0].get("lower").is_none());
    assert_eq!(ranges[0]["upper"], 5.0);
    assert_eq!(ranges[2]["lower"], 10.0);
    assert!(ranges[2].get("upper").is_none());

    let idle = &metrics[8]["value"]["distributionValue"];
    assert_eq!(idle, &serde_json::json!({"count": 0}));
}

#[test]
fn test_conversion_does_not_mutate_input() {
    let list = snapshot();
    let before = list.clone();

    let _ = list.encode_rpc();
    let _ = list.to_json_string().unwrap();

    assert_eq!(list, before);
}

#[test]
fn test_snapshot_read_concurrently() {
    let list = snapshot();
    let bytes = list.encode_rpc();

    std::thread::scope(|s| {
        let rpc = s.spawn(|| list.encode_rpc());
        let rest = s.spawn(|| list.to_json_string().unwrap());

        assert_eq!(rpc.join().unwrap(), bytes);
        let text = rest.join().unwrap();
        assert_eq!(MetricList::from_json_str(&text).unwrap(), list);
    });
}

#[test]
fn test_one_bad_metric_rejects_the_list() {
    let mut sparse = snapshot().to_json();
    sparse[3].value.as_mut().unwrap().uint_value = None;

    let text = serde_json::to_string(&sparse).unwrap();
    let result = MetricList::from_json_str(&text);
    assert!(matches!(result, Err(MessageError::KindMismatch { .. })));
}
