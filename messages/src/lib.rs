//! Tricorder Messages
//!
//! This crate defines how a single measured metric value is represented in
//! memory and how it is encoded for the two metric transports.
//!
//! # Modules
//!
//! - [`models`] - Logical model: durations, distributions, values, metrics
//! - [`rpc`] - Dense protobuf encoding for the binary RPC transport
//! - [`json`] - Sparse JSON encoding for the REST transport
//! - [`error`] - Errors shared by both encodings
//!
//! # Example
//!
//! ```
//! use messages::models::{Distribution, Metric, MetricList, Unit};
//!
//! let latency = Distribution::from_buckets(&[5.0, 10.0], &[2, 3, 1])
//!     .unwrap()
//!     .with_statistics(1.0, 12.0, 6.5, 7.0, 39.0);
//!
//! let list: MetricList = vec![
//!     Metric::new("/rpc/latency", latency).with_unit(Unit::Millisecond),
//!     Metric::new("/rpc/calls", 6_u64),
//! ]
//! .into();
//!
//! let text = list.to_json_string().unwrap();
//! let bytes = list.encode_rpc();
//! assert_eq!(MetricList::from_json_str(&text).unwrap(), list);
//! assert_eq!(MetricList::decode_rpc(&bytes).unwrap(), list);
//! assert!(list.get("/nonexistent/metric").unwrap_err().is_not_found());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod json;
pub mod models;
pub mod rpc;

pub use error::MessageError;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use prost;
pub use serde_json;
