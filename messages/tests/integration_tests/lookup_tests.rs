//! Integration tests for looking metrics up by path.

use messages::models::MetricList;
use messages::MessageError;

use super::common::snapshot;

#[test]
fn test_lookup_after_rpc_decode() {
    let list = MetricList::decode_rpc(&snapshot().encode_rpc()).unwrap();
    let metric = list.get("/proc/memory/free").unwrap();
    assert_eq!(metric.value.as_uint(), Some(4_096));
}

#[test]
fn test_lookup_after_json_decode() {
    let text = snapshot().to_json_string().unwrap();
    let list = MetricList::from_json_str(&text).unwrap();
    let metric = list.get("/proc/name").unwrap();
    assert_eq!(metric.description, "Program name");
}

#[test]
fn test_not_found_is_identical_for_both_transports() {
    let from_rpc = MetricList::decode_rpc(&snapshot().encode_rpc()).unwrap();
    let from_json = MetricList::from_json_str(&snapshot().to_json_string().unwrap()).unwrap();

    let rpc_err = from_rpc.get("/nonexistent/metric").unwrap_err();
    let json_err = from_json.get("/nonexistent/metric").unwrap_err();

    assert!(matches!(rpc_err, MessageError::MetricNotFound));
    assert!(matches!(json_err, MessageError::MetricNotFound));
    assert_eq!(rpc_err.to_string(), json_err.to_string());
}

#[test]
fn test_empty_list_is_not_an_error() {
    let list = MetricList::decode_rpc(&[]).unwrap();
    assert!(list.is_empty());
    assert!(list.get("/anything").unwrap_err().is_not_found());
}
